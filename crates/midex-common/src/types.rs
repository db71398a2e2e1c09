//! Shared identifier types
//!
//! IMEx accessions come in two shapes: publication-level `IM-<n>` and
//! interaction-level `IM-<n>-<k>`. Publication identifiers pair an external
//! namespace (pmid, doi, or a database-internal label) with a value, and are
//! the lookup key used against the IMEx Central registry.

use crate::error::{MidexError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier namespace for PubMed ids
pub const NAMESPACE_PMID: &str = "pmid";

/// Identifier namespace for DOIs
pub const NAMESPACE_DOI: &str = "doi";

/// Identifier namespace for database-internal accessions (unpublished papers)
pub const NAMESPACE_INTERNAL: &str = "internal";

/// A publication-level IMEx accession (`IM-<n>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImexAccession(String);

impl ImexAccession {
    /// Parse and validate an `IM-<n>` accession
    pub fn parse(value: &str) -> Result<Self> {
        let digits = value
            .strip_prefix("IM-")
            .ok_or_else(|| MidexError::Accession(value.to_string()))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MidexError::Accession(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// The accession as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the interaction-level id `IM-<n>-<k>` for suffix `k`
    pub fn interaction_id(&self, suffix: u64) -> String {
        format!("{}-{}", self.0, suffix)
    }

    /// Extract the suffix of an interaction-level id minted from this
    /// accession, or None if `id` belongs to a different accession.
    pub fn interaction_suffix(&self, id: &str) -> Option<u64> {
        let rest = id.strip_prefix(self.0.as_str())?;
        let digits = rest.strip_prefix('-')?;
        digits.parse().ok()
    }
}

impl fmt::Display for ImexAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ImexAccession {
    type Err = MidexError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// External identifier of a publication: namespace plus value, e.g. `pmid:12345`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicationId {
    pub namespace: String,
    pub id: String,
}

impl PublicationId {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// Shorthand for a PubMed identifier
    pub fn pmid(id: impl Into<String>) -> Self {
        Self::new(NAMESPACE_PMID, id)
    }

    /// Shorthand for a DOI
    pub fn doi(id: impl Into<String>) -> Self {
        Self::new(NAMESPACE_DOI, id)
    }

    /// Parse a `namespace:value` pair
    pub fn parse(value: &str) -> Result<Self> {
        let (namespace, id) = value
            .split_once(':')
            .ok_or_else(|| MidexError::Identifier(value.to_string()))?;
        if namespace.is_empty() || id.is_empty() {
            return Err(MidexError::Identifier(value.to_string()));
        }
        Ok(Self::new(namespace, id))
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}
