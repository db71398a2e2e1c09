//! PSI-MI XML document writer
//!
//! Event-based writer over quick-xml. One `entry` per publication inside a
//! single `entrySet`; experiments and interactors are emitted once into the
//! entry-level lists and referenced by numeric id from then on (the id maps
//! are the per-session caches avoiding duplicate serialization).

use super::builder::{builder_for, ElementBuilder};
use super::PsiVersion;
use flate2::write::GzEncoder;
use flate2::Compression;
use midex_common::{MidexError, Result};
use midex_core::model::{CvTerm, Interactor, Publication};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::collections::HashMap;
use std::io::Write as _;
use std::path::Path;
use tracing::info;

/// PSI-MI XML export session for one schema version
pub struct XmlExporter {
    builder: Box<dyn ElementBuilder>,
}

impl XmlExporter {
    pub fn new(version: PsiVersion) -> Self {
        Self {
            builder: builder_for(version),
        }
    }

    pub fn version(&self) -> PsiVersion {
        self.builder.version()
    }

    /// Render the publications as one `entrySet` document
    pub fn export(&self, publications: &[Publication], source: &str) -> Result<String> {
        let mut session = Session::new(self.builder.as_ref());
        session.write_document(publications, source)?;
        let bytes = session.into_bytes();
        String::from_utf8(bytes).map_err(|e| MidexError::Xml(e.to_string()))
    }

    /// Write the document to a file, gzip-compressed when requested
    pub fn export_to_file(
        &self,
        publications: &[Publication],
        source: &str,
        path: &Path,
        gzip: bool,
    ) -> Result<()> {
        let document = self.export(publications, source)?;
        if gzip {
            let file = std::fs::File::create(path)?;
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder.write_all(document.as_bytes())?;
            encoder.finish()?;
        } else {
            std::fs::write(path, &document)?;
        }
        info!(
            path = %path.display(),
            version = %self.version(),
            publications = publications.len(),
            gzip,
            "Wrote PSI-MI XML export"
        );
        Ok(())
    }
}

/// One document in progress, with its id maps
struct Session<'a> {
    builder: &'a dyn ElementBuilder,
    writer: Writer<Vec<u8>>,
    experiment_ids: HashMap<String, usize>,
    interactor_ids: HashMap<String, usize>,
    next_id: usize,
}

impl<'a> Session<'a> {
    fn new(builder: &'a dyn ElementBuilder) -> Self {
        Self {
            builder,
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
            experiment_ids: HashMap::new(),
            interactor_ids: HashMap::new(),
            next_id: 1,
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    fn allocate_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ------------------------------------------------------------------
    // Low-level event helpers
    // ------------------------------------------------------------------

    fn write(&mut self, event: Event) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| MidexError::Xml(e.to_string()))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        for (key, value) in attrs {
            element.push_attribute((*key, *value));
        }
        self.write(Event::Start(element))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut element = BytesStart::new(name);
        for (key, value) in attrs {
            element.push_attribute((*key, *value));
        }
        self.write(Event::Empty(element))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    // ------------------------------------------------------------------
    // Shared building blocks
    // ------------------------------------------------------------------

    fn names(&mut self, shortlabel: &str, fullname: Option<&str>) -> Result<()> {
        self.start("names", &[])?;
        self.text_element("shortLabel", shortlabel)?;
        if let Some(fullname) = fullname {
            self.text_element("fullName", fullname)?;
        }
        self.end("names")
    }

    fn primary_ref(&mut self, db: &str, id: &str, ref_type: Option<&str>) -> Result<()> {
        let mut attrs = vec![("db", db), ("id", id)];
        if let Some(ref_type) = ref_type {
            attrs.push(("refType", ref_type));
        }
        self.empty("primaryRef", &attrs)
    }

    fn secondary_ref(&mut self, db: &str, id: &str, ref_type: Option<&str>) -> Result<()> {
        let mut attrs = vec![("db", db), ("id", id)];
        if let Some(ref_type) = ref_type {
            attrs.push(("refType", ref_type));
        }
        self.empty("secondaryRef", &attrs)
    }

    /// A CV element: names plus the psi-mi identity reference
    fn cv_element(&mut self, element: &str, term: &CvTerm) -> Result<()> {
        self.start(element, &[])?;
        self.names(&term.shortlabel, None)?;
        if let Some(mi) = &term.mi {
            self.start("xref", &[])?;
            self.primary_ref("psi-mi", mi, Some("identity"))?;
            self.end("xref")?;
        }
        self.end(element)
    }

    // ------------------------------------------------------------------
    // Document structure
    // ------------------------------------------------------------------

    fn write_document(&mut self, publications: &[Publication], source: &str) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let attrs = self.builder.entry_set_attributes();
        let borrowed: Vec<(&str, &str)> = attrs
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        self.start("entrySet", &borrowed)?;

        for publication in publications {
            self.write_entry(publication, source)?;
        }

        self.end("entrySet")
    }

    fn write_entry(&mut self, publication: &Publication, source: &str) -> Result<()> {
        // Ids are scoped per entry
        self.experiment_ids.clear();
        self.interactor_ids.clear();

        self.start("entry", &[])?;

        self.start("source", &[])?;
        self.names(source, None)?;
        self.end("source")?;

        self.write_experiment_list(publication)?;
        self.write_interactor_list(publication)?;
        self.write_interaction_list(publication)?;

        self.end("entry")
    }

    fn write_experiment_list(&mut self, publication: &Publication) -> Result<()> {
        if publication.experiments.is_empty() {
            return Ok(());
        }
        self.start("experimentList", &[])?;
        for experiment in &publication.experiments {
            let id = self.allocate_id();
            self.experiment_ids.insert(experiment.ac.clone(), id);
            let id_str = id.to_string();
            self.start("experimentDescription", &[("id", id_str.as_str())])?;
            self.names(&experiment.shortlabel, None)?;

            self.start("bibref", &[])?;
            self.start("xref", &[])?;
            self.primary_ref(
                &publication.identifier.namespace,
                &publication.identifier.id,
                Some("primary-reference"),
            )?;
            self.end("xref")?;
            self.end("bibref")?;

            if let Some(imex) = experiment.imex_primary_ref() {
                self.start("xref", &[])?;
                self.primary_ref("imex", &imex.id, Some("imex-primary"))?;
                self.end("xref")?;
            }

            if let Some(method) = &experiment.detection_method {
                self.cv_element("interactionDetectionMethod", method)?;
            }

            self.end("experimentDescription")?;
        }
        self.end("experimentList")
    }

    fn write_interactor_list(&mut self, publication: &Publication) -> Result<()> {
        // Collect interactors once per entry, in first-seen order
        let mut interactors: Vec<&Interactor> = Vec::new();
        for interaction in publication.interactions() {
            for participant in &interaction.participants {
                let identity = participant.interactor.identity();
                if !self.interactor_ids.contains_key(&identity) {
                    let id = self.allocate_id();
                    self.interactor_ids.insert(identity, id);
                    interactors.push(&participant.interactor);
                }
            }
        }
        if interactors.is_empty() {
            return Ok(());
        }

        self.start("interactorList", &[])?;
        for interactor in interactors {
            let id = self.interactor_ids[&interactor.identity()];
            let id_str = id.to_string();
            let element = self.builder.interactor_element();
            self.start(element, &[("id", id_str.as_str())])?;
            self.names(&interactor.shortlabel, None)?;

            self.start("xref", &[])?;
            self.primary_ref(&interactor.database.shortlabel, &interactor.id, Some("identity"))?;
            self.end("xref")?;

            self.cv_element("interactorType", &interactor.interactor_type)?;

            if let Some(taxid) = interactor.organism_taxid {
                let taxid_str = taxid.to_string();
                self.start("organism", &[("ncbiTaxId", taxid_str.as_str())])?;
                if let Some(name) = &interactor.organism_name {
                    self.names(name, None)?;
                }
                self.end("organism")?;
            }

            self.end(element)?;
        }
        self.end("interactorList")
    }

    fn write_interaction_list(&mut self, publication: &Publication) -> Result<()> {
        let has_interactions = publication.interactions().next().is_some();
        if !has_interactions {
            return Ok(());
        }

        self.start("interactionList", &[])?;
        for experiment in &publication.experiments {
            let experiment_id = self.experiment_ids[&experiment.ac];
            for interaction in &experiment.interactions {
                let id = self.allocate_id();
                let id_str = id.to_string();
                self.start("interaction", &[("id", id_str.as_str())])?;
                self.names(&interaction.shortlabel, None)?;

                if let Some(imex) = interaction.imex_primary_ref() {
                    self.start("xref", &[])?;
                    self.primary_ref("imex", &imex.id, Some("imex-primary"))?;
                    for xref in interaction.xrefs.iter().filter(|x| !x.is_imex_primary()) {
                        self.secondary_ref(&xref.database.shortlabel, &xref.id, None)?;
                    }
                    self.end("xref")?;
                }

                self.start("experimentList", &[])?;
                self.text_element("experimentRef", &experiment_id.to_string())?;
                self.end("experimentList")?;

                self.start("participantList", &[])?;
                for participant in &interaction.participants {
                    let participant_id = self.allocate_id();
                    let participant_id_str = participant_id.to_string();
                    let element = self.builder.participant_element();
                    self.start(element, &[("id", participant_id_str.as_str())])?;
                    let interactor_id = self.interactor_ids[&participant.interactor.identity()];
                    self.text_element(
                        self.builder.interactor_ref_element(),
                        &interactor_id.to_string(),
                    )?;
                    if let Some(role) = &participant.experimental_role {
                        self.cv_element("experimentalRole", role)?;
                    }
                    self.end(element)?;
                }
                self.end("participantList")?;

                if let Some(interaction_type) = &interaction.interaction_type {
                    self.cv_element("interactionType", interaction_type)?;
                }

                if self.builder.supports_attributes() && !interaction.annotations.is_empty() {
                    self.start("attributeList", &[])?;
                    for annotation in &interaction.annotations {
                        let name = annotation.topic.shortlabel.as_str();
                        self.start("attribute", &[("name", name)])?;
                        if let Some(text) = &annotation.text {
                            self.write(Event::Text(BytesText::new(text)))?;
                        }
                        self.end("attribute")?;
                    }
                    self.end("attributeList")?;
                }

                self.end("interaction")?;
            }
        }
        self.end("interactionList")
    }
}
