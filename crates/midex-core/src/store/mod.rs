//! Publication store boundary
//!
//! The persistence layer of the original system is consumed, not owned;
//! here it is a trait. The batch drivers and tests run against
//! [`InMemoryStore`]; a relational implementation would live behind the
//! same trait.

use crate::model::Publication;
use async_trait::async_trait;
use midex_common::PublicationId;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence failures (infrastructure errors: abort the current
/// publication, never the whole run)
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Publication not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Other(String),
}

/// The ORM boundary of the original design, reduced to what the exchange
/// layer actually calls
#[async_trait]
pub trait PublicationStore: Send + Sync {
    /// Fetch a publication by its database-internal accession
    async fn get_by_ac(&self, ac: &str) -> StoreResult<Option<Publication>>;

    /// Fetch a publication by its external identifier
    async fn get_by_identifier(&self, id: &PublicationId) -> StoreResult<Option<Publication>>;

    /// Publications already carrying an IMEx accession
    async fn list_with_imex(&self) -> StoreResult<Vec<Publication>>;

    /// Publications without an accession yet (assignment candidates;
    /// eligibility itself is decided by the reconciliation manager)
    async fn list_imex_candidates(&self) -> StoreResult<Vec<Publication>>;

    /// Persist a publication snapshot (upsert by ac)
    async fn save(&self, publication: &Publication) -> StoreResult<()>;
}

/// In-memory store used by the batch drivers and tests
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<HashMap<String, Publication>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a set of publications
    pub async fn with_publications(publications: Vec<Publication>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write().await;
            for publication in publications {
                inner.insert(publication.ac.clone(), publication);
            }
        }
        store
    }

    /// Load publications from a JSON array file
    pub async fn from_json_file(path: &std::path::Path) -> StoreResult<Self> {
        let data = std::fs::read_to_string(path)?;
        let publications: Vec<Publication> = serde_json::from_str(&data)?;
        Ok(Self::with_publications(publications).await)
    }

    /// Write all publications back to a JSON array file, sorted by ac
    pub async fn to_json_file(&self, path: &std::path::Path) -> StoreResult<()> {
        let inner = self.inner.read().await;
        let mut publications: Vec<&Publication> = inner.values().collect();
        publications.sort_by(|a, b| a.ac.cmp(&b.ac));
        let json = serde_json::to_string_pretty(&publications)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl PublicationStore for InMemoryStore {
    async fn get_by_ac(&self, ac: &str) -> StoreResult<Option<Publication>> {
        Ok(self.inner.read().await.get(ac).cloned())
    }

    async fn get_by_identifier(&self, id: &PublicationId) -> StoreResult<Option<Publication>> {
        Ok(self
            .inner
            .read()
            .await
            .values()
            .find(|p| &p.identifier == id)
            .cloned())
    }

    async fn list_with_imex(&self) -> StoreResult<Vec<Publication>> {
        let mut publications: Vec<Publication> = self
            .inner
            .read()
            .await
            .values()
            .filter(|p| p.imex_accession.is_some() || p.xrefs.iter().any(|x| x.is_imex_primary()))
            .cloned()
            .collect();
        publications.sort_by(|a, b| a.ac.cmp(&b.ac));
        Ok(publications)
    }

    async fn list_imex_candidates(&self) -> StoreResult<Vec<Publication>> {
        let mut publications: Vec<Publication> = self
            .inner
            .read()
            .await
            .values()
            .filter(|p| {
                p.imex_accession.is_none() && !p.xrefs.iter().any(|x| x.is_imex_primary())
            })
            .cloned()
            .collect();
        publications.sort_by(|a, b| a.ac.cmp(&b.ac));
        Ok(publications)
    }

    async fn save(&self, publication: &Publication) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .insert(publication.ac.clone(), publication.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurationDepth, Xref};
    use midex_common::ImexAccession;

    fn publication(ac: &str, pmid: &str) -> Publication {
        Publication::new(ac, PublicationId::pmid(pmid))
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let store = InMemoryStore::new();
        store.save(&publication("EBI-1", "100")).await.unwrap();

        let found = store.get_by_ac("EBI-1").await.unwrap();
        assert!(found.is_some());
        assert!(store.get_by_ac("EBI-2").await.unwrap().is_none());

        let by_id = store
            .get_by_identifier(&PublicationId::pmid("100"))
            .await
            .unwrap();
        assert_eq!(by_id.unwrap().ac, "EBI-1");
    }

    #[tokio::test]
    async fn test_listing_partitions() {
        let mut with_field = publication("EBI-1", "100");
        with_field.imex_accession = Some(ImexAccession::parse("IM-1").unwrap());

        let mut with_xref = publication("EBI-2", "200");
        with_xref
            .xrefs
            .push(Xref::imex_primary(&ImexAccession::parse("IM-2").unwrap()));

        let candidate = publication("EBI-3", "300").with_depth(CurationDepth::Imex);

        let store = InMemoryStore::with_publications(vec![with_field, with_xref, candidate]).await;

        let with_imex = store.list_with_imex().await.unwrap();
        assert_eq!(with_imex.len(), 2);

        let candidates = store.list_imex_candidates().await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].ac, "EBI-3");
    }
}
