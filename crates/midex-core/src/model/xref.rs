//! Cross-references and annotations
//!
//! An Xref is a (database, identifier, qualifier) triple attached to a
//! curated object. Within one object's Xref set at most one entry may carry
//! (database = imex, qualifier = imex-primary); identical duplicates are
//! collapsible, conflicting ones are not resolvable automatically.

use super::cv::{psimi, CvTerm};
use midex_common::ImexAccession;
use serde::{Deserialize, Serialize};

/// A typed cross-reference: (database, id, optional qualifier)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Xref {
    pub database: CvTerm,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<CvTerm>,
}

impl Xref {
    pub fn new(database: CvTerm, id: impl Into<String>) -> Self {
        Self {
            database,
            id: id.into(),
            qualifier: None,
        }
    }

    pub fn with_qualifier(database: CvTerm, id: impl Into<String>, qualifier: CvTerm) -> Self {
        Self {
            database,
            id: id.into(),
            qualifier: Some(qualifier),
        }
    }

    /// The canonical (imex, imex-primary) reference for a publication-level
    /// accession.
    pub fn imex_primary(accession: &ImexAccession) -> Self {
        Self::with_qualifier(psimi::imex(), accession.as_str(), psimi::imex_primary())
    }

    /// The canonical (imex, imex-primary) reference for an interaction-level
    /// id of the form `IM-<n>-<k>`.
    pub fn imex_interaction(id: impl Into<String>) -> Self {
        Self::with_qualifier(psimi::imex(), id, psimi::imex_primary())
    }

    /// True if this Xref is (database = imex, qualifier = imex-primary)
    pub fn is_imex_primary(&self) -> bool {
        self.database.is_mi(psimi::IMEX_MI)
            && self
                .qualifier
                .as_ref()
                .map(|q| q.is_mi(psimi::IMEX_PRIMARY_MI))
                .unwrap_or(false)
    }
}

/// A free-text annotation under a CV topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub topic: CvTerm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Annotation {
    pub fn new(topic: CvTerm) -> Self {
        Self { topic, text: None }
    }

    pub fn with_text(topic: CvTerm, text: impl Into<String>) -> Self {
        Self {
            topic,
            text: Some(text.into()),
        }
    }
}
