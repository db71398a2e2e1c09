//! Publications and curation depth

use super::cv::psimi;
use super::experiment::Experiment;
use super::interaction::InteractionEvidence;
use super::xref::{Annotation, Xref};
use anyhow::Result;
use midex_common::{ImexAccession, PublicationId};
use serde::{Deserialize, Serialize};

/// How thoroughly a publication's interactions were curated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurationDepth {
    Imex,
    Mimix,
    #[default]
    Undefined,
}

impl CurationDepth {
    pub fn as_str(&self) -> &str {
        match self {
            CurationDepth::Imex => "imex curation",
            CurationDepth::Mimix => "mimix curation",
            CurationDepth::Undefined => "undefined",
        }
    }
}

/// A curated publication, the unit of IMEx reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Database-internal accession (e.g. "EBI-7654321")
    pub ac: String,
    /// External identifier, the registry lookup key (e.g. pmid:12345)
    pub identifier: PublicationId,
    /// IMEx accession, once assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imex_accession: Option<ImexAccession>,
    pub curation_depth: CurationDepth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    /// First author, surname-first, for the MITAB author column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_author: Option<String>,
    /// Owning database/institution label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub experiments: Vec<Experiment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<Xref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Publication {
    pub fn new(ac: impl Into<String>, identifier: PublicationId) -> Self {
        Self {
            ac: ac.into(),
            identifier,
            imex_accession: None,
            curation_depth: CurationDepth::default(),
            journal: None,
            year: None,
            first_author: None,
            owner: None,
            experiments: Vec::new(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_depth(mut self, depth: CurationDepth) -> Self {
        self.curation_depth = depth;
        self
    }

    pub fn with_journal(mut self, journal: impl Into<String>, year: i32) -> Self {
        self.journal = Some(journal.into());
        self.year = Some(year);
        self
    }

    pub fn with_experiments(mut self, experiments: Vec<Experiment>) -> Self {
        self.experiments = experiments;
        self
    }

    /// All interaction evidences across all experiments
    pub fn interactions(&self) -> impl Iterator<Item = &InteractionEvidence> {
        self.experiments.iter().flat_map(|e| e.interactions.iter())
    }

    /// True if there is at least one interaction and every one of them is
    /// protein-protein (drives the "full coverage" annotation)
    pub fn is_fully_protein_protein(&self) -> bool {
        let mut any = false;
        for interaction in self.interactions() {
            if !interaction.is_protein_protein() {
                return false;
            }
            any = true;
        }
        any
    }

    /// True if at least one interaction is protein-protein (IMEx eligibility)
    pub fn has_protein_protein_interaction(&self) -> bool {
        self.interactions().any(|i| i.is_protein_protein())
    }

    /// True if curators flagged this publication as never IMEx-assignable
    pub fn is_imex_unassignable(&self) -> bool {
        self.annotations
            .iter()
            .any(|a| a.topic.shortlabel == psimi::IMEX_UNASSIGNABLE)
    }

    /// The annotation under the given topic shortlabel, if present
    pub fn annotation(&self, topic_shortlabel: &str) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|a| a.topic.shortlabel == topic_shortlabel)
    }

    /// Basic consistency checks before a publication enters a batch run
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.ac.is_empty(), "Publication ac cannot be empty");
        anyhow::ensure!(
            !self.identifier.id.is_empty(),
            "Publication identifier cannot be empty"
        );
        for experiment in &self.experiments {
            anyhow::ensure!(
                !experiment.ac.is_empty(),
                "Experiment ac cannot be empty (publication {})",
                self.ac
            );
            for interaction in &experiment.interactions {
                anyhow::ensure!(
                    !interaction.ac.is_empty(),
                    "Interaction ac cannot be empty (experiment {})",
                    experiment.ac
                );
            }
        }
        Ok(())
    }
}
