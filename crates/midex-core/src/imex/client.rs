//! IMEx Central registry client
//!
//! Synchronous request/response against the central accession registry.
//! No retry or backoff: a transport or service failure surfaces as
//! [`RegistryError`] and aborts the current publication only.

use super::records::{PublicationStatus, RegistryPublication};
use async_trait::async_trait;
use midex_common::{ImexAccession, PublicationId};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default timeout for registry requests in seconds.
/// Can be overridden via the MIDEX_REGISTRY_TIMEOUT_SECS environment variable.
pub const DEFAULT_REGISTRY_TIMEOUT_SECS: u64 = 60;

/// Result type alias for registry operations
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Registry failures (infrastructure errors: abort the current publication,
/// never the whole run)
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Registry transport error: {0}")]
    Transport(String),

    #[error("Registry service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("No registry record for {0}")]
    NotFound(PublicationId),

    #[error("Invalid registry record: {0}")]
    InvalidRecord(String),
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        RegistryError::Transport(err.to_string())
    }
}

/// Operations the reconciliation logic needs from the central registry
#[async_trait]
pub trait ImexCentralClient: Send + Sync {
    /// Look up the record registered under an external identifier
    async fn get_publication(
        &self,
        id: &PublicationId,
    ) -> RegistryResult<Option<RegistryPublication>>;

    /// Register a new record
    async fn create_publication(
        &self,
        record: &RegistryPublication,
    ) -> RegistryResult<RegistryPublication>;

    /// Replace the identifier list of an existing record
    async fn update_identifiers(
        &self,
        id: &PublicationId,
        identifiers: &[PublicationId],
    ) -> RegistryResult<RegistryPublication>;

    /// Move an existing record to a new status
    async fn update_status(
        &self,
        id: &PublicationId,
        status: PublicationStatus,
    ) -> RegistryResult<RegistryPublication>;

    /// Attach an admin group to an existing record
    async fn add_admin_group(
        &self,
        id: &PublicationId,
        group: &str,
    ) -> RegistryResult<RegistryPublication>;

    /// Attach an admin user to an existing record
    async fn add_admin_user(
        &self,
        id: &PublicationId,
        user: &str,
    ) -> RegistryResult<RegistryPublication>;

    /// Mint an IMEx accession for an existing record
    async fn assign_accession(&self, id: &PublicationId) -> RegistryResult<ImexAccession>;

    /// Fetch the record for an identifier, registering it first if unknown
    async fn get_or_create(&self, id: &PublicationId) -> RegistryResult<RegistryPublication> {
        if let Some(record) = self.get_publication(id).await? {
            return Ok(record);
        }
        self.create_publication(&RegistryPublication::new(id.clone()))
            .await
    }
}

// ============================================================================
// HTTP implementation
// ============================================================================

/// HTTP/JSON client against a running IMEx Central endpoint
pub struct HttpImexCentralClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<(String, String)>,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

#[derive(Serialize)]
struct GroupBody<'a> {
    group: &'a str,
}

#[derive(Serialize)]
struct UserBody<'a> {
    user: &'a str,
}

#[derive(Deserialize)]
struct AccessionResponse {
    accession: String,
}

impl HttpImexCentralClient {
    /// Create a client for the given endpoint, credentials optional
    pub fn new(
        base_url: impl Into<String>,
        credentials: Option<(String, String)>,
    ) -> RegistryResult<Self> {
        let timeout_secs = std::env::var("MIDEX_REGISTRY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REGISTRY_TIMEOUT_SECS);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn publication_url(&self, id: &PublicationId) -> String {
        format!(
            "{}/publications/{}/{}",
            self.base_url, id.namespace, id.id
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, Some(password)),
            None => builder,
        }
    }

    async fn read_record(
        &self,
        response: reqwest::Response,
    ) -> RegistryResult<RegistryPublication> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Service {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ImexCentralClient for HttpImexCentralClient {
    async fn get_publication(
        &self,
        id: &PublicationId,
    ) -> RegistryResult<Option<RegistryPublication>> {
        let url = self.publication_url(id);
        debug!(url = %url, "Fetching registry record");

        let response = self.request(self.client.get(&url)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(self.read_record(response).await?))
    }

    async fn create_publication(
        &self,
        record: &RegistryPublication,
    ) -> RegistryResult<RegistryPublication> {
        let url = format!("{}/publications", self.base_url);
        let response = self
            .request(self.client.post(&url).json(record))
            .send()
            .await?;
        self.read_record(response).await
    }

    async fn update_identifiers(
        &self,
        id: &PublicationId,
        identifiers: &[PublicationId],
    ) -> RegistryResult<RegistryPublication> {
        let url = format!("{}/identifiers", self.publication_url(id));
        let response = self
            .request(self.client.put(&url).json(identifiers))
            .send()
            .await?;
        self.read_record(response).await
    }

    async fn update_status(
        &self,
        id: &PublicationId,
        status: PublicationStatus,
    ) -> RegistryResult<RegistryPublication> {
        let url = format!("{}/status", self.publication_url(id));
        let body = StatusBody {
            status: status.as_str(),
        };
        let response = self
            .request(self.client.put(&url).json(&body))
            .send()
            .await?;
        self.read_record(response).await
    }

    async fn add_admin_group(
        &self,
        id: &PublicationId,
        group: &str,
    ) -> RegistryResult<RegistryPublication> {
        let url = format!("{}/admin-groups", self.publication_url(id));
        let response = self
            .request(self.client.post(&url).json(&GroupBody { group }))
            .send()
            .await?;
        self.read_record(response).await
    }

    async fn add_admin_user(
        &self,
        id: &PublicationId,
        user: &str,
    ) -> RegistryResult<RegistryPublication> {
        let url = format!("{}/admin-users", self.publication_url(id));
        let response = self
            .request(self.client.post(&url).json(&UserBody { user }))
            .send()
            .await?;
        self.read_record(response).await
    }

    async fn assign_accession(&self, id: &PublicationId) -> RegistryResult<ImexAccession> {
        let url = format!("{}/imex-accession", self.publication_url(id));
        let response = self.request(self.client.post(&url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Service {
                status: status.as_u16(),
                message,
            });
        }
        let body: AccessionResponse = response.json().await?;
        ImexAccession::parse(&body.accession)
            .map_err(|e| RegistryError::InvalidRecord(e.to_string()))
    }
}

// ============================================================================
// In-memory implementation
// ============================================================================

/// In-memory registry used by tests and dry runs
#[derive(Debug, Default)]
pub struct StubRegistry {
    records: Mutex<HashMap<String, RegistryPublication>>,
    next_accession: Mutex<u64>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_accession: Mutex::new(1),
        }
    }

    /// Seed the registry with pre-existing records
    pub fn with_records(records: Vec<RegistryPublication>) -> Self {
        let registry = Self::new();
        {
            let mut map = registry.records.lock().expect("registry lock poisoned");
            let mut max_seen = 0u64;
            for record in records {
                if let Some(acc) = &record.imex_accession {
                    if let Some(n) = acc.as_str().strip_prefix("IM-").and_then(|d| d.parse().ok())
                    {
                        max_seen = max_seen.max(n);
                    }
                }
                for id in &record.identifiers {
                    map.insert(id.to_string(), record.clone());
                }
            }
            *registry
                .next_accession
                .lock()
                .expect("registry lock poisoned") = max_seen + 1;
        }
        registry
    }

    fn with_record<T>(
        &self,
        id: &PublicationId,
        f: impl FnOnce(&mut RegistryPublication) -> T,
    ) -> RegistryResult<T> {
        let mut map = self.records.lock().expect("registry lock poisoned");
        let record = map
            .get_mut(&id.to_string())
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        Ok(f(record))
    }
}

#[async_trait]
impl ImexCentralClient for StubRegistry {
    async fn get_publication(
        &self,
        id: &PublicationId,
    ) -> RegistryResult<Option<RegistryPublication>> {
        let map = self.records.lock().expect("registry lock poisoned");
        Ok(map.get(&id.to_string()).cloned())
    }

    async fn create_publication(
        &self,
        record: &RegistryPublication,
    ) -> RegistryResult<RegistryPublication> {
        let mut map = self.records.lock().expect("registry lock poisoned");
        for id in &record.identifiers {
            if map.contains_key(&id.to_string()) {
                return Err(RegistryError::InvalidRecord(format!(
                    "Identifier already registered: {}",
                    id
                )));
            }
        }
        for id in &record.identifiers {
            map.insert(id.to_string(), record.clone());
        }
        Ok(record.clone())
    }

    async fn update_identifiers(
        &self,
        id: &PublicationId,
        identifiers: &[PublicationId],
    ) -> RegistryResult<RegistryPublication> {
        self.with_record(id, |record| {
            record.identifiers = identifiers.to_vec();
            record.clone()
        })
    }

    async fn update_status(
        &self,
        id: &PublicationId,
        status: PublicationStatus,
    ) -> RegistryResult<RegistryPublication> {
        self.with_record(id, |record| {
            record.status = status;
            record.clone()
        })
    }

    async fn add_admin_group(
        &self,
        id: &PublicationId,
        group: &str,
    ) -> RegistryResult<RegistryPublication> {
        self.with_record(id, |record| {
            if !record.admin_groups.iter().any(|g| g == group) {
                record.admin_groups.push(group.to_string());
            }
            record.clone()
        })
    }

    async fn add_admin_user(
        &self,
        id: &PublicationId,
        user: &str,
    ) -> RegistryResult<RegistryPublication> {
        self.with_record(id, |record| {
            if !record.admin_users.iter().any(|u| u == user) {
                record.admin_users.push(user.to_string());
            }
            record.clone()
        })
    }

    async fn assign_accession(&self, id: &PublicationId) -> RegistryResult<ImexAccession> {
        let accession = {
            let mut next = self.next_accession.lock().expect("registry lock poisoned");
            let value = format!("IM-{}", *next);
            *next += 1;
            ImexAccession::parse(&value)
                .map_err(|e| RegistryError::InvalidRecord(e.to_string()))?
        };
        self.with_record(id, |record| {
            record.imex_accession = Some(accession.clone());
        })?;
        Ok(accession)
    }
}
