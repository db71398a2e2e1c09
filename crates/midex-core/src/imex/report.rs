//! Batch-run report collection
//!
//! Data and business conflicts are never fatal: they are collected here and
//! surfaced to an operator after the run as CSV files (`processed.csv`,
//! `publication-assigned.csv`, `interaction-assigned.csv`).

use midex_common::{MidexError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classification of a non-fatal finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    PublicationConflict,
    RegistryMismatch,
    ExperimentConflict,
    InteractionConflict,
    DepthMissing,
    Ineligible,
}

impl ReportKind {
    pub fn as_str(&self) -> &str {
        match self {
            ReportKind::PublicationConflict => "publication_conflict",
            ReportKind::RegistryMismatch => "registry_mismatch",
            ReportKind::ExperimentConflict => "experiment_conflict",
            ReportKind::InteractionConflict => "interaction_conflict",
            ReportKind::DepthMissing => "depth_missing",
            ReportKind::Ineligible => "ineligible",
        }
    }
}

/// One operator-facing finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub kind: ReportKind,
    /// External identifier of the publication concerned
    pub publication: String,
    pub detail: String,
}

/// Collects findings and assignment records for one batch run
#[derive(Debug, Clone, Default)]
pub struct ReportCollector {
    entries: Vec<ReportEntry>,
    /// (publication id, outcome, detail) per processed publication
    processed: Vec<(String, String, String)>,
    /// (publication id, accession) per newly assigned publication
    publication_assignments: Vec<(String, String)>,
    /// (publication id, interaction ac, interaction imex id)
    interaction_assignments: Vec<(String, String, String)>,
}

impl ReportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: ReportKind, publication: &str, detail: impl Into<String>) {
        self.entries.push(ReportEntry {
            kind,
            publication: publication.to_string(),
            detail: detail.into(),
        });
    }

    pub fn record_processed(
        &mut self,
        publication: &str,
        outcome: &str,
        detail: impl Into<String>,
    ) {
        self.processed
            .push((publication.to_string(), outcome.to_string(), detail.into()));
    }

    pub fn record_publication_assignment(&mut self, publication: &str, accession: &str) {
        self.publication_assignments
            .push((publication.to_string(), accession.to_string()));
    }

    pub fn record_interaction_assignment(
        &mut self,
        publication: &str,
        interaction_ac: &str,
        imex_id: &str,
    ) {
        self.interaction_assignments.push((
            publication.to_string(),
            interaction_ac.to_string(),
            imex_id.to_string(),
        ));
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn entries_of_kind(&self, kind: ReportKind) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn has_conflicts(&self) -> bool {
        self.entries.iter().any(|e| {
            matches!(
                e.kind,
                ReportKind::PublicationConflict
                    | ReportKind::RegistryMismatch
                    | ReportKind::ExperimentConflict
                    | ReportKind::InteractionConflict
            )
        })
    }

    /// Write the three run reports into `dir`, creating it if needed
    pub fn write_csv_reports(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        let mut processed = csv::Writer::from_path(dir.join("processed.csv"))
            .map_err(|e| MidexError::Csv(e.to_string()))?;
        processed
            .write_record(["publication", "outcome", "detail"])
            .map_err(|e| MidexError::Csv(e.to_string()))?;
        for (publication, outcome, detail) in &self.processed {
            processed
                .write_record([publication, outcome, detail])
                .map_err(|e| MidexError::Csv(e.to_string()))?;
        }
        processed
            .flush()
            .map_err(|e| MidexError::Csv(e.to_string()))?;

        let mut publications = csv::Writer::from_path(dir.join("publication-assigned.csv"))
            .map_err(|e| MidexError::Csv(e.to_string()))?;
        publications
            .write_record(["publication", "imex"])
            .map_err(|e| MidexError::Csv(e.to_string()))?;
        for (publication, accession) in &self.publication_assignments {
            publications
                .write_record([publication, accession])
                .map_err(|e| MidexError::Csv(e.to_string()))?;
        }
        publications
            .flush()
            .map_err(|e| MidexError::Csv(e.to_string()))?;

        let mut interactions = csv::Writer::from_path(dir.join("interaction-assigned.csv"))
            .map_err(|e| MidexError::Csv(e.to_string()))?;
        interactions
            .write_record(["publication", "interaction", "interaction_imex"])
            .map_err(|e| MidexError::Csv(e.to_string()))?;
        for (publication, ac, imex_id) in &self.interaction_assignments {
            interactions
                .write_record([publication, ac, imex_id])
                .map_err(|e| MidexError::Csv(e.to_string()))?;
        }
        interactions
            .flush()
            .map_err(|e| MidexError::Csv(e.to_string()))?;

        Ok(())
    }
}
