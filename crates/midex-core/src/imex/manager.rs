//! IMEx reconciliation manager
//!
//! Decides, for one publication at a time, which IMEx accession is
//! authoritative, whether a fresh one must be minted, and pushes the result
//! down into experiments and interaction evidences. Conflicts are findings
//! for the report; registry and store failures abort the publication.

use super::assigner::{ImexAssigner, ImexPrimaryScan};
use super::client::{ImexCentralClient, RegistryError};
use super::report::{ReportCollector, ReportKind};
use crate::model::{CurationDepth, Publication};
use crate::store::StoreError;
use midex_common::{ImexAccession, PublicationId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Result type alias for reconciliation operations
pub type ImexResult<T> = std::result::Result<T, ImexError>;

/// Infrastructure failures during reconciliation. Each aborts the current
/// publication with nothing persisted for it; the batch moves on.
#[derive(Error, Debug)]
pub enum ImexError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Data error: {0}")]
    Data(String),
}

/// One journal the consortium accepts for new assignments, from the given
/// publication year onwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRule {
    pub journal: String,
    pub from_year: i32,
}

impl JournalRule {
    pub fn new(journal: impl Into<String>, from_year: i32) -> Self {
        Self {
            journal: journal.into(),
            from_year,
        }
    }
}

/// Eligibility rules for minting new accessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub journals: Vec<JournalRule>,
    /// Admin group attached to records this database registers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_group: Option<String>,
    /// Admin user attached to records this database registers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_user: Option<String>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            journals: vec![
                JournalRule::new("Cell", 2006),
                JournalRule::new("Cancer Cell", 2006),
                JournalRule::new("Proteomics", 2006),
                JournalRule::new("Oncogene", 2006),
                JournalRule::new("Molecular BioSystems", 2007),
            ],
            admin_group: None,
            admin_user: None,
        }
    }
}

impl EligibilityConfig {
    /// True if the publication's journal/year pair is accepted for new
    /// assignments
    pub fn journal_eligible(&self, journal: Option<&str>, year: Option<i32>) -> bool {
        let (Some(journal), Some(year)) = (journal, year) else {
            return false;
        };
        self.journals
            .iter()
            .any(|rule| rule.journal.eq_ignore_ascii_case(journal) && year >= rule.from_year)
    }
}

/// How reconciliation ended for one publication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// An accession was attached/refreshed and propagated
    Updated {
        accession: ImexAccession,
        newly_assigned: bool,
    },
    /// An unresolvable accession conflict; nothing was changed
    Conflict,
    /// Nothing to do for this publication
    Skipped(SkipReason),
}

/// Why a publication was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Carries an accession but is not curated at IMEx depth
    DepthMissing,
    /// Fails the new-assignment eligibility rules
    Ineligible,
    /// Curators flagged it as never assignable
    Unassignable,
    /// No accession anywhere and not a candidate for one
    NoCandidate,
}

impl ReconcileOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            ReconcileOutcome::Updated {
                newly_assigned: true,
                ..
            } => "assigned",
            ReconcileOutcome::Updated {
                newly_assigned: false,
                ..
            } => "updated",
            ReconcileOutcome::Conflict => "conflict",
            ReconcileOutcome::Skipped(SkipReason::DepthMissing) => "depth_missing",
            ReconcileOutcome::Skipped(SkipReason::Ineligible) => "ineligible",
            ReconcileOutcome::Skipped(SkipReason::Unassignable) => "unassignable",
            ReconcileOutcome::Skipped(SkipReason::NoCandidate) => "no_candidate",
        }
    }
}

/// Reconciles one publication at a time against the central registry
pub struct ImexCentralManager {
    client: Arc<dyn ImexCentralClient>,
    eligibility: EligibilityConfig,
}

impl ImexCentralManager {
    pub fn new(client: Arc<dyn ImexCentralClient>, eligibility: EligibilityConfig) -> Self {
        Self {
            client,
            eligibility,
        }
    }

    /// Reconcile a publication snapshot in place.
    ///
    /// On `Ok(Updated { .. })` the snapshot has been mutated and should be
    /// persisted by the caller in one step. On every other outcome the
    /// snapshot is untouched. `Err` means a registry failure; nothing was
    /// mutated either.
    pub async fn reconcile(
        &self,
        publication: &mut Publication,
        collector: &mut ReportCollector,
    ) -> ImexResult<ReconcileOutcome> {
        let id = publication.identifier.clone();

        // Step 1: publication-level references. A conflict aborts before
        // any mutation, including duplicate collapse.
        let local = match ImexAssigner::scan_imex_primary(&publication.xrefs) {
            ImexPrimaryScan::Conflict(values) => {
                warn!(publication = %id, values = ?values, "Conflicting imex-primary references");
                collector.record(
                    ReportKind::PublicationConflict,
                    &id.to_string(),
                    format!("competing imex-primary references: {}", values.join(", ")),
                );
                collector.record_processed(
                    &id.to_string(),
                    ReconcileOutcome::Conflict.as_str(),
                    values.join("|"),
                );
                return Ok(ReconcileOutcome::Conflict);
            },
            ImexPrimaryScan::Single(value) => Some(
                ImexAccession::parse(&value)
                    .map_err(|e| ImexError::Data(e.to_string()))?,
            ),
            ImexPrimaryScan::None => publication.imex_accession.clone(),
        };

        // Step 3: registry lookup by external identifier.
        let remote = self
            .client
            .get_publication(&id)
            .await?
            .and_then(|record| record.imex_accession);

        let (candidate, newly_assigned) = match (local, remote) {
            (Some(local), Some(remote)) if local != remote => {
                warn!(
                    publication = %id,
                    local = %local,
                    remote = %remote,
                    "Local and registry accessions disagree"
                );
                collector.record(
                    ReportKind::RegistryMismatch,
                    &id.to_string(),
                    format!("local {} vs registry {}", local, remote),
                );
                collector.record_processed(
                    &id.to_string(),
                    ReconcileOutcome::Conflict.as_str(),
                    format!("{}|{}", local, remote),
                );
                return Ok(ReconcileOutcome::Conflict);
            },
            (Some(local), _) => (Some(local), false),
            (None, Some(remote)) => (Some(remote), false),
            (None, None) => {
                // Step 4: no accession anywhere; mint one if eligible.
                match self.check_eligibility(publication) {
                    Ok(()) => (Some(self.register_and_mint(&id).await?), true),
                    Err(reason) => {
                        collector.record_processed(
                            &id.to_string(),
                            ReconcileOutcome::Skipped(reason).as_str(),
                            "",
                        );
                        return Ok(ReconcileOutcome::Skipped(reason));
                    },
                }
            },
        };

        let accession = candidate.ok_or_else(|| {
            ImexError::Data(format!("No accession resolved for {}", id))
        })?;

        // A publication carrying an accession without IMEx curation depth is
        // a curation error: report it and leave every level untouched.
        if publication.curation_depth != CurationDepth::Imex {
            warn!(publication = %id, "IMEx accession without imex curation depth");
            collector.record(
                ReportKind::DepthMissing,
                &id.to_string(),
                format!("accession {} but curation depth is not imex", accession),
            );
            collector.record_processed(
                &id.to_string(),
                ReconcileOutcome::Skipped(SkipReason::DepthMissing).as_str(),
                accession.as_str(),
            );
            return Ok(ReconcileOutcome::Skipped(SkipReason::DepthMissing));
        }

        // Steps 5-6: attach, annotate, propagate.
        ImexAssigner::collapse_duplicates(&mut publication.xrefs);
        ImexAssigner::attach_primary(&mut publication.xrefs, accession.as_str());
        publication.imex_accession = Some(accession.clone());
        ImexAssigner::apply_coverage_annotations(publication);

        let summary = ImexAssigner::propagate(publication, &accession);
        for (ac, existing) in &summary.experiment_conflicts {
            collector.record(
                ReportKind::ExperimentConflict,
                &id.to_string(),
                format!("experiment {} keeps {}", ac, existing),
            );
        }
        for (ac, existing) in &summary.interaction_conflicts {
            collector.record(
                ReportKind::InteractionConflict,
                &id.to_string(),
                format!("interaction {} keeps {}", ac, existing),
            );
        }
        for (ac, imex_id) in &summary.interactions_assigned {
            collector.record_interaction_assignment(&id.to_string(), ac, imex_id);
        }
        if newly_assigned {
            collector.record_publication_assignment(&id.to_string(), accession.as_str());
        }

        let outcome = ReconcileOutcome::Updated {
            accession: accession.clone(),
            newly_assigned,
        };
        collector.record_processed(&id.to_string(), outcome.as_str(), accession.as_str());
        info!(
            publication = %id,
            accession = %accession,
            newly_assigned,
            experiments_updated = summary.experiments_updated,
            interactions_assigned = summary.interactions_assigned.len(),
            "Reconciled publication"
        );
        Ok(outcome)
    }

    fn check_eligibility(&self, publication: &Publication) -> std::result::Result<(), SkipReason> {
        if publication.is_imex_unassignable() {
            return Err(SkipReason::Unassignable);
        }
        if publication.curation_depth != CurationDepth::Imex {
            return Err(SkipReason::NoCandidate);
        }
        if !publication.has_protein_protein_interaction() {
            return Err(SkipReason::Ineligible);
        }
        if !self
            .eligibility
            .journal_eligible(publication.journal.as_deref(), publication.year)
        {
            return Err(SkipReason::Ineligible);
        }
        Ok(())
    }

    /// Register the publication remotely and mint a fresh accession. This
    /// remote side-effect precedes the local save; if that save later
    /// fails, the minted accession is still on record remotely.
    async fn register_and_mint(&self, id: &PublicationId) -> ImexResult<ImexAccession> {
        let record = self.client.get_or_create(id).await?;
        let accession = match record.imex_accession {
            Some(existing) => existing,
            None => self.client.assign_accession(id).await?,
        };

        if let Some(group) = &self.eligibility.admin_group {
            self.client.add_admin_group(id, group).await?;
        }
        if let Some(user) = &self.eligibility.admin_user {
            self.client.add_admin_user(id, user).await?;
        }

        info!(publication = %id, accession = %accession, "Registered publication remotely");
        Ok(accession)
    }
}
