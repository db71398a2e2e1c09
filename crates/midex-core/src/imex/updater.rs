//! Global batch updater
//!
//! Drives reconciliation over the whole store in two passes: refresh
//! publications that already carry an IMEx accession, then mint accessions
//! for eligible candidates. Each publication is one unit of work; a failure
//! aborts that publication only and the run continues.

use super::manager::{ImexCentralManager, ImexError, ImexResult, ReconcileOutcome};
use super::report::ReportCollector;
use crate::store::PublicationStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Statistics collected over one batch run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateStats {
    /// Publications examined
    pub processed: i64,
    /// Publications whose existing accession was refreshed/propagated
    pub updated: i64,
    /// Publications that received a freshly minted accession
    pub newly_assigned: i64,
    /// Publications with unresolvable accession conflicts
    pub conflicts: i64,
    /// Publications skipped (ineligible, wrong depth, unassignable)
    pub skipped: i64,
    /// Publications aborted on registry/store failure
    pub failed: i64,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration_secs: f64,
}

impl UpdateStats {
    pub fn new() -> Self {
        Self {
            started_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
        if let (Some(start), Some(end)) = (self.started_at, self.completed_at) {
            self.duration_secs = (end - start).num_milliseconds() as f64 / 1000.0;
        }
    }

    fn absorb(&mut self, outcome: &ReconcileOutcome) {
        self.processed += 1;
        match outcome {
            ReconcileOutcome::Updated {
                newly_assigned: true,
                ..
            } => self.newly_assigned += 1,
            ReconcileOutcome::Updated {
                newly_assigned: false,
                ..
            } => self.updated += 1,
            ReconcileOutcome::Conflict => self.conflicts += 1,
            ReconcileOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// Batch driver over the publication store
pub struct GlobalImexUpdater {
    manager: ImexCentralManager,
    store: Arc<dyn PublicationStore>,
}

impl GlobalImexUpdater {
    pub fn new(manager: ImexCentralManager, store: Arc<dyn PublicationStore>) -> Self {
        Self { manager, store }
    }

    /// Refresh publications that already carry an IMEx accession
    pub async fn update_existing_imex_publications(
        &self,
        collector: &mut ReportCollector,
    ) -> ImexResult<UpdateStats> {
        let publications = self.store.list_with_imex().await?;
        info!(count = publications.len(), "Updating existing IMEx publications");
        self.process_batch(publications, collector).await
    }

    /// Mint accessions for eligible publications that lack one
    pub async fn assign_new_imex_ids(
        &self,
        collector: &mut ReportCollector,
    ) -> ImexResult<UpdateStats> {
        let publications = self.store.list_imex_candidates().await?;
        info!(count = publications.len(), "Assigning new IMEx identifiers");
        self.process_batch(publications, collector).await
    }

    /// Both passes in sequence, stats merged
    pub async fn run(&self, collector: &mut ReportCollector) -> ImexResult<UpdateStats> {
        let mut stats = self.update_existing_imex_publications(collector).await?;
        let assigned = self.assign_new_imex_ids(collector).await?;

        stats.processed += assigned.processed;
        stats.updated += assigned.updated;
        stats.newly_assigned += assigned.newly_assigned;
        stats.conflicts += assigned.conflicts;
        stats.skipped += assigned.skipped;
        stats.failed += assigned.failed;
        stats.complete();
        Ok(stats)
    }

    async fn process_batch(
        &self,
        publications: Vec<crate::model::Publication>,
        collector: &mut ReportCollector,
    ) -> ImexResult<UpdateStats> {
        let mut stats = UpdateStats::new();

        for mut publication in publications {
            let id = publication.identifier.clone();
            match self.manager.reconcile(&mut publication, collector).await {
                Ok(outcome) => {
                    if matches!(outcome, ReconcileOutcome::Updated { .. }) {
                        // One save covers all three levels; a failure here
                        // leaves the stored snapshot untouched.
                        if let Err(e) = self.store.save(&publication).await {
                            error!(publication = %id, error = %e, "Failed to persist publication");
                            collector.record_processed(&id.to_string(), "failed", e.to_string());
                            stats.processed += 1;
                            stats.failed += 1;
                            continue;
                        }
                    }
                    stats.absorb(&outcome);
                },
                Err(ImexError::Registry(e)) => {
                    error!(publication = %id, error = %e, "Registry failure, publication aborted");
                    collector.record_processed(&id.to_string(), "failed", e.to_string());
                    stats.processed += 1;
                    stats.failed += 1;
                },
                Err(e) => {
                    error!(publication = %id, error = %e, "Publication aborted");
                    collector.record_processed(&id.to_string(), "failed", e.to_string());
                    stats.processed += 1;
                    stats.failed += 1;
                },
            }
        }

        stats.complete();
        Ok(stats)
    }
}
