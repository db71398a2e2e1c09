//! UniProt flat-file line export
//!
//! Fixed-grammar annotation lines for the curated export subset. Only
//! publications curated at IMEx or MIMIx depth contribute, and only their
//! protein-protein evidences with UniProt-identified participants:
//!
//! - `DR   IntAct; <accession>; <n>.` one per interactor, `n` distinct
//!   interactions it appears in
//! - `CC   -!- INTERACTION:` block per interactor, one partner sub-line
//!   `<self>; <partner>: <label>; NbExp=<n>; IntAct=<ac>[, <ac>...];`
//! - GO annotation lines (GAF tab grammar, protein binding GO:0005515
//!   with IPI evidence naming the partner)

use chrono::NaiveDate;
use midex_common::Result;
use midex_core::model::{CurationDepth, InteractionEvidence, Publication};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// GO term for protein binding, the annotation every exported pair gets
pub const GO_PROTEIN_BINDING: &str = "GO:0005515";

/// Writes UniProt DR/CC/GO annotation lines
pub struct UniprotExporter {
    /// Database label stamped into the lines (e.g. "IntAct")
    source: String,
}

/// One exportable binary pair: subject accession, partner accession,
/// partner label, interaction evidence
struct ExportPair<'a> {
    subject: &'a str,
    partner: &'a str,
    partner_label: &'a str,
    subject_taxid: Option<i32>,
    publication: &'a Publication,
    interaction: &'a InteractionEvidence,
}

impl UniprotExporter {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Whether a publication contributes to the UniProt export at all
    fn exportable(publication: &Publication) -> bool {
        matches!(
            publication.curation_depth,
            CurationDepth::Imex | CurationDepth::Mimix
        )
    }

    /// Flatten the export subset into directed (subject, partner) pairs;
    /// each two-participant protein evidence contributes both directions.
    fn pairs<'a>(publications: &'a [Publication]) -> Vec<ExportPair<'a>> {
        let mut pairs = Vec::new();
        for publication in publications.iter().filter(|p| Self::exportable(p)) {
            for interaction in publication.interactions() {
                if !interaction.is_protein_protein() || interaction.participants.len() != 2 {
                    continue;
                }
                let a = &interaction.participants[0].interactor;
                let b = &interaction.participants[1].interactor;
                pairs.push(ExportPair {
                    subject: &a.id,
                    partner: &b.id,
                    partner_label: &b.shortlabel,
                    subject_taxid: a.organism_taxid,
                    publication,
                    interaction,
                });
                pairs.push(ExportPair {
                    subject: &b.id,
                    partner: &a.id,
                    partner_label: &a.shortlabel,
                    subject_taxid: b.organism_taxid,
                    publication,
                    interaction,
                });
            }
        }
        pairs
    }

    /// `DR` lines, one per interactor, sorted by accession
    pub fn dr_lines(&self, publications: &[Publication]) -> Vec<String> {
        let mut counts: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for pair in Self::pairs(publications) {
            let acs = counts.entry(pair.subject).or_default();
            if !acs.contains(&pair.interaction.ac.as_str()) {
                acs.push(&pair.interaction.ac);
            }
        }

        counts
            .iter()
            .map(|(accession, interactions)| {
                format!("DR   {}; {}; {}.", self.source, accession, interactions.len())
            })
            .collect()
    }

    /// `CC -!- INTERACTION:` blocks, one per interactor, sorted by accession
    pub fn cc_lines(&self, publications: &[Publication]) -> Vec<String> {
        // subject -> partner -> (partner label, interaction acs)
        let mut by_subject: BTreeMap<&str, BTreeMap<&str, (&str, Vec<&str>)>> = BTreeMap::new();
        for pair in Self::pairs(publications) {
            let partners = by_subject.entry(pair.subject).or_default();
            let entry = partners
                .entry(pair.partner)
                .or_insert((pair.partner_label, Vec::new()));
            if !entry.1.contains(&pair.interaction.ac.as_str()) {
                entry.1.push(&pair.interaction.ac);
            }
        }

        let mut lines = Vec::new();
        for (subject, partners) in &by_subject {
            lines.push("CC   -!- INTERACTION:".to_string());
            for (partner, (label, interactions)) in partners {
                lines.push(format!(
                    "CC       {}; {}: {}; NbExp={}; {}={};",
                    subject,
                    partner,
                    label,
                    interactions.len(),
                    self.source,
                    interactions.join(", "),
                ));
            }
        }
        lines
    }

    /// GO annotation lines in GAF tab grammar
    pub fn go_lines(&self, publications: &[Publication], date: NaiveDate) -> Vec<String> {
        let date = date.format("%Y%m%d").to_string();
        let mut lines = Vec::new();
        for pair in Self::pairs(publications) {
            let taxon = pair
                .subject_taxid
                .map(|t| format!("taxon:{}", t))
                .unwrap_or_default();
            let columns: Vec<String> = vec![
                "UniProtKB".to_string(),
                pair.subject.to_string(),
                pair.subject.to_string(),
                String::new(),
                GO_PROTEIN_BINDING.to_string(),
                format!("PMID:{}", pair.publication.identifier.id),
                "IPI".to_string(),
                format!("UniProtKB:{}", pair.partner),
                "F".to_string(),
                String::new(),
                String::new(),
                "protein".to_string(),
                taxon,
                date.clone(),
                self.source.clone(),
            ];
            lines.push(columns.join("\t"));
        }
        lines.sort();
        lines.dedup();
        lines
    }

    /// Write `uniprot_dr.txt`, `uniprot_cc.txt` and `uniprot_go.txt` into
    /// `dir`, creating it if needed
    pub fn write_files(
        &self,
        publications: &[Publication],
        dir: &Path,
        date: NaiveDate,
    ) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        let dr = self.dr_lines(publications);
        std::fs::write(dir.join("uniprot_dr.txt"), dr.join("\n") + "\n")?;

        let cc = self.cc_lines(publications);
        std::fs::write(dir.join("uniprot_cc.txt"), cc.join("\n") + "\n")?;

        let go = self.go_lines(publications, date);
        std::fs::write(dir.join("uniprot_go.txt"), go.join("\n") + "\n")?;

        info!(
            dir = %dir.display(),
            dr_lines = dr.len(),
            cc_lines = cc.len(),
            go_lines = go.len(),
            "Wrote UniProt export lines"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midex_common::PublicationId;
    use midex_core::model::{Experiment, Interactor, Participant};

    fn sample_publications() -> Vec<Publication> {
        let p53 = || Interactor::protein("P04637", "tp53_human").with_organism(9606, "Homo sapiens");
        let mdm2 = || Interactor::protein("Q00987", "mdm2_human").with_organism(9606, "Homo sapiens");
        let sirt1 = || Interactor::protein("Q96EB6", "sir1_human").with_organism(9606, "Homo sapiens");

        vec![Publication::new("EBI-1", PublicationId::pmid("12345"))
            .with_depth(CurationDepth::Imex)
            .with_experiments(vec![Experiment::new("EBI-E1", "exp-1").with_interactions(vec![
                InteractionEvidence::new("EBI-I1", "int-1").with_participants(vec![
                    Participant::new(p53()),
                    Participant::new(mdm2()),
                ]),
                InteractionEvidence::new("EBI-I2", "int-2").with_participants(vec![
                    Participant::new(p53()),
                    Participant::new(mdm2()),
                ]),
                InteractionEvidence::new("EBI-I3", "int-3").with_participants(vec![
                    Participant::new(p53()),
                    Participant::new(sirt1()),
                ]),
            ])])]
    }

    #[test]
    fn test_dr_lines_count_distinct_interactions() {
        let exporter = UniprotExporter::new("IntAct");
        let lines = exporter.dr_lines(&sample_publications());

        assert_eq!(
            lines,
            vec![
                "DR   IntAct; P04637; 3.",
                "DR   IntAct; Q00987; 2.",
                "DR   IntAct; Q96EB6; 1.",
            ]
        );
    }

    #[test]
    fn test_cc_block_groups_partners() {
        let exporter = UniprotExporter::new("IntAct");
        let lines = exporter.cc_lines(&sample_publications());

        assert_eq!(lines[0], "CC   -!- INTERACTION:");
        assert_eq!(
            lines[1],
            "CC       P04637; Q00987: mdm2_human; NbExp=2; IntAct=EBI-I1, EBI-I2;"
        );
        assert_eq!(
            lines[2],
            "CC       P04637; Q96EB6: sir1_human; NbExp=1; IntAct=EBI-I3;"
        );
    }

    #[test]
    fn test_go_lines_use_gaf_grammar() {
        let exporter = UniprotExporter::new("IntAct");
        let date = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let lines = exporter.go_lines(&sample_publications(), date);

        assert!(!lines.is_empty());
        let first = &lines[0];
        let columns: Vec<&str> = first.split('\t').collect();
        assert_eq!(columns.len(), 15);
        assert_eq!(columns[0], "UniProtKB");
        assert_eq!(columns[4], GO_PROTEIN_BINDING);
        assert_eq!(columns[6], "IPI");
        assert_eq!(columns[13], "20260807");
    }

    #[test]
    fn test_undefined_depth_is_excluded() {
        let mut publications = sample_publications();
        publications[0].curation_depth = CurationDepth::Undefined;

        let exporter = UniprotExporter::new("IntAct");
        assert!(exporter.dr_lines(&publications).is_empty());
        assert!(exporter.cc_lines(&publications).is_empty());
    }
}
