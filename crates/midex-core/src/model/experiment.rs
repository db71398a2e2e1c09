//! Experiments

use super::cv::CvTerm;
use super::interaction::InteractionEvidence;
use super::xref::{Annotation, Xref};
use serde::{Deserialize, Serialize};

/// One experiment of a publication, owning its interaction evidences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    /// Database-internal accession
    pub ac: String,
    pub shortlabel: String,
    /// Interaction detection method (two hybrid, coip, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_method: Option<CvTerm>,
    /// NCBI taxonomy id of the host organism
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_taxid: Option<i32>,
    pub interactions: Vec<InteractionEvidence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<Xref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Experiment {
    pub fn new(ac: impl Into<String>, shortlabel: impl Into<String>) -> Self {
        Self {
            ac: ac.into(),
            shortlabel: shortlabel.into(),
            detection_method: None,
            host_taxid: None,
            interactions: Vec::new(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_detection_method(mut self, method: CvTerm) -> Self {
        self.detection_method = Some(method);
        self
    }

    pub fn with_interactions(mut self, interactions: Vec<InteractionEvidence>) -> Self {
        self.interactions = interactions;
        self
    }

    /// The (imex, imex-primary) Xref carried by this experiment, if any
    pub fn imex_primary_ref(&self) -> Option<&Xref> {
        self.xrefs.iter().find(|x| x.is_imex_primary())
    }
}
