//! Remote registry record types

use midex_common::{ImexAccession, PublicationId};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a registry record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    New,
    Reserved,
    #[serde(rename = "INPROGRESS")]
    InProgress,
    Released,
    Discarded,
    Incomplete,
    Processed,
}

impl PublicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PublicationStatus::New => "NEW",
            PublicationStatus::Reserved => "RESERVED",
            PublicationStatus::InProgress => "INPROGRESS",
            PublicationStatus::Released => "RELEASED",
            PublicationStatus::Discarded => "DISCARDED",
            PublicationStatus::Incomplete => "INCOMPLETE",
            PublicationStatus::Processed => "PROCESSED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NEW" => Some(PublicationStatus::New),
            "RESERVED" => Some(PublicationStatus::Reserved),
            "INPROGRESS" => Some(PublicationStatus::InProgress),
            "RELEASED" => Some(PublicationStatus::Released),
            "DISCARDED" => Some(PublicationStatus::Discarded),
            "INCOMPLETE" => Some(PublicationStatus::Incomplete),
            "PROCESSED" => Some(PublicationStatus::Processed),
            _ => None,
        }
    }
}

/// One publication record held by the central registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryPublication {
    /// External identifiers known to the registry (pmid, doi, internal)
    pub identifiers: Vec<PublicationId>,
    /// IMEx accession, once minted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imex_accession: Option<ImexAccession>,
    /// Database that owns the curation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub status: PublicationStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_users: Vec<String>,
}

impl RegistryPublication {
    /// A fresh record for one identifier, before registration
    pub fn new(identifier: PublicationId) -> Self {
        Self {
            identifiers: vec![identifier],
            imex_accession: None,
            owner: None,
            status: PublicationStatus::New,
            admin_groups: Vec::new(),
            admin_users: Vec::new(),
        }
    }

    /// True if the record knows the given external identifier
    pub fn has_identifier(&self, id: &PublicationId) -> bool {
        self.identifiers.iter().any(|i| i == id)
    }
}
