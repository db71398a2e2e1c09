//! Xref and annotation surgery for IMEx assignment
//!
//! Pure functions over one publication snapshot: collecting and collapsing
//! (imex, imex-primary) references, attaching accessions, writing the
//! coverage annotations, and deriving per-interaction ids. No I/O here;
//! the manager decides what to do with the outcomes.

use crate::model::{psimi, Annotation, Publication, Xref};
use midex_common::ImexAccession;
use tracing::debug;

/// Annotation text marking a publication whose interactions are all
/// protein-protein.
pub const FULL_COVERAGE_TEXT: &str = "Only protein-protein interactions";

/// Annotation text for publications with non-protein interactions, which
/// only get IMEx ids on the protein-protein subset.
pub const PARTIAL_COVERAGE_TEXT: &str =
    "Only protein-protein interactions are assigned an IMEx id";

/// What a scan of one entity's (imex, imex-primary) references produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImexPrimaryScan {
    /// No imex-primary reference present
    None,
    /// Exactly one distinct accession value (duplicates collapsible)
    Single(String),
    /// Two or more distinct accession values; unresolvable
    Conflict(Vec<String>),
}

/// Stateless helper for IMEx reference bookkeeping
pub struct ImexAssigner;

impl ImexAssigner {
    /// Scan an Xref set for (imex, imex-primary) references and classify
    /// the distinct accession values found.
    pub fn scan_imex_primary(xrefs: &[Xref]) -> ImexPrimaryScan {
        let mut values: Vec<String> = Vec::new();
        for xref in xrefs.iter().filter(|x| x.is_imex_primary()) {
            if !values.iter().any(|v| v == &xref.id) {
                values.push(xref.id.clone());
            }
        }
        match values.len() {
            0 => ImexPrimaryScan::None,
            1 => ImexPrimaryScan::Single(values.remove(0)),
            _ => ImexPrimaryScan::Conflict(values),
        }
    }

    /// Remove identical duplicate imex-primary references, keeping the
    /// first occurrence of each id. Returns how many were dropped.
    pub fn collapse_duplicates(xrefs: &mut Vec<Xref>) -> usize {
        let mut seen: Vec<String> = Vec::new();
        let before = xrefs.len();
        xrefs.retain(|x| {
            if !x.is_imex_primary() {
                return true;
            }
            if seen.iter().any(|id| id == &x.id) {
                false
            } else {
                seen.push(x.id.clone());
                true
            }
        });
        before - xrefs.len()
    }

    /// Idempotently attach an imex-primary reference for `id`. Returns true
    /// if the Xref set changed. Callers must have ruled out a conflicting
    /// primary beforehand.
    pub fn attach_primary(xrefs: &mut Vec<Xref>, id: &str) -> bool {
        if xrefs.iter().any(|x| x.is_imex_primary() && x.id == id) {
            return false;
        }
        xrefs.push(Xref::imex_interaction(id));
        true
    }

    /// Write the two publication-level summary annotations: "imex curation"
    /// and either full or partial coverage. Re-running replaces, never
    /// duplicates.
    pub fn apply_coverage_annotations(publication: &mut Publication) {
        let full = publication.is_fully_protein_protein();

        publication.annotations.retain(|a| {
            !a.topic.is_mi(psimi::IMEX_CURATION_MI)
                && !a.topic.is_mi(psimi::FULL_COVERAGE_MI)
                && !a.topic.is_mi(psimi::PARTIAL_COVERAGE_MI)
        });

        publication
            .annotations
            .push(Annotation::new(psimi::imex_curation()));
        if full {
            publication
                .annotations
                .push(Annotation::with_text(psimi::full_coverage(), FULL_COVERAGE_TEXT));
        } else {
            publication.annotations.push(Annotation::with_text(
                psimi::partial_coverage(),
                PARTIAL_COVERAGE_TEXT,
            ));
        }
    }

    /// First free interaction suffix for `accession`: one past the highest
    /// suffix already assigned anywhere in the publication, so re-runs after
    /// partial assignment never collide.
    pub fn next_interaction_suffix(
        publication: &Publication,
        accession: &ImexAccession,
    ) -> u64 {
        let mut max_seen = 0u64;
        for interaction in publication.interactions() {
            for xref in interaction.xrefs.iter().filter(|x| x.is_imex_primary()) {
                if let Some(suffix) = accession.interaction_suffix(&xref.id) {
                    max_seen = max_seen.max(suffix);
                }
            }
        }
        max_seen + 1
    }
}

/// Result of pushing an accession down into experiments and interactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationSummary {
    pub experiments_updated: usize,
    pub interactions_assigned: Vec<(String, String)>,
    /// (ac, existing id) pairs left untouched because a different primary
    /// was already present
    pub experiment_conflicts: Vec<(String, String)>,
    pub interaction_conflicts: Vec<(String, String)>,
    pub duplicates_removed: usize,
}

impl ImexAssigner {
    /// Propagate a resolved publication accession to every experiment and
    /// interaction evidence. Children already carrying a *different*
    /// primary are recorded as conflicts and skipped; their siblings still
    /// update. Idempotent.
    pub fn propagate(
        publication: &mut Publication,
        accession: &ImexAccession,
    ) -> PropagationSummary {
        let mut summary = PropagationSummary::default();
        let mut next_suffix = Self::next_interaction_suffix(publication, accession);

        for experiment in &mut publication.experiments {
            summary.duplicates_removed += Self::collapse_duplicates(&mut experiment.xrefs);
            match Self::scan_imex_primary(&experiment.xrefs) {
                ImexPrimaryScan::None => {
                    Self::attach_primary(&mut experiment.xrefs, accession.as_str());
                    summary.experiments_updated += 1;
                },
                ImexPrimaryScan::Single(existing) => {
                    if existing != accession.as_str() {
                        summary
                            .experiment_conflicts
                            .push((experiment.ac.clone(), existing));
                    }
                },
                ImexPrimaryScan::Conflict(values) => {
                    summary
                        .experiment_conflicts
                        .push((experiment.ac.clone(), values.join("|")));
                },
            }

            for interaction in &mut experiment.interactions {
                summary.duplicates_removed += Self::collapse_duplicates(&mut interaction.xrefs);
                match Self::scan_imex_primary(&interaction.xrefs) {
                    ImexPrimaryScan::None => {
                        let id = accession.interaction_id(next_suffix);
                        next_suffix += 1;
                        Self::attach_primary(&mut interaction.xrefs, &id);
                        summary
                            .interactions_assigned
                            .push((interaction.ac.clone(), id));
                    },
                    ImexPrimaryScan::Single(existing) => {
                        if accession.interaction_suffix(&existing).is_none() {
                            summary
                                .interaction_conflicts
                                .push((interaction.ac.clone(), existing));
                        }
                    },
                    ImexPrimaryScan::Conflict(values) => {
                        summary
                            .interaction_conflicts
                            .push((interaction.ac.clone(), values.join("|")));
                    },
                }
            }
        }

        debug!(
            publication = %publication.ac,
            accession = %accession,
            experiments_updated = summary.experiments_updated,
            interactions_assigned = summary.interactions_assigned.len(),
            "Propagated IMEx accession"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Experiment, InteractionEvidence, Interactor, Participant, Publication};
    use midex_common::PublicationId;

    fn accession(value: &str) -> ImexAccession {
        ImexAccession::parse(value).unwrap()
    }

    fn protein_interaction(ac: &str) -> InteractionEvidence {
        InteractionEvidence::new(ac, ac).with_participants(vec![
            Participant::new(Interactor::protein("P12345", "bait")),
            Participant::new(Interactor::protein("Q67890", "prey")),
        ])
    }

    fn publication_with_interactions(acs: &[&str]) -> Publication {
        Publication::new("EBI-1", PublicationId::pmid("12345")).with_experiments(vec![
            Experiment::new("EBI-E1", "exp-1")
                .with_interactions(acs.iter().map(|ac| protein_interaction(ac)).collect()),
        ])
    }

    #[test]
    fn test_scan_classification() {
        let acc = accession("IM-3");
        assert_eq!(ImexAssigner::scan_imex_primary(&[]), ImexPrimaryScan::None);

        let single = vec![Xref::imex_primary(&acc), Xref::imex_primary(&acc)];
        assert_eq!(
            ImexAssigner::scan_imex_primary(&single),
            ImexPrimaryScan::Single("IM-3".to_string())
        );

        let conflicting = vec![
            Xref::imex_primary(&acc),
            Xref::imex_primary(&accession("IM-4")),
        ];
        assert_eq!(
            ImexAssigner::scan_imex_primary(&conflicting),
            ImexPrimaryScan::Conflict(vec!["IM-3".to_string(), "IM-4".to_string()])
        );
    }

    #[test]
    fn test_collapse_keeps_one_of_identical() {
        let acc = accession("IM-3");
        let mut xrefs = vec![Xref::imex_primary(&acc), Xref::imex_primary(&acc)];
        let removed = ImexAssigner::collapse_duplicates(&mut xrefs);
        assert_eq!(removed, 1);
        assert_eq!(xrefs.len(), 1);
    }

    #[test]
    fn test_collapse_leaves_other_xrefs_alone() {
        let acc = accession("IM-3");
        let mut xrefs = vec![
            Xref::new(psimi::pubmed(), "12345"),
            Xref::imex_primary(&acc),
            Xref::new(psimi::pubmed(), "12345"),
        ];
        assert_eq!(ImexAssigner::collapse_duplicates(&mut xrefs), 0);
        assert_eq!(xrefs.len(), 3);
    }

    #[test]
    fn test_attach_primary_idempotent() {
        let mut xrefs = Vec::new();
        assert!(ImexAssigner::attach_primary(&mut xrefs, "IM-3"));
        assert!(!ImexAssigner::attach_primary(&mut xrefs, "IM-3"));
        assert_eq!(xrefs.len(), 1);
    }

    #[test]
    fn test_coverage_annotations_full() {
        let mut publication = publication_with_interactions(&["EBI-I1", "EBI-I2"]);
        ImexAssigner::apply_coverage_annotations(&mut publication);

        assert_eq!(publication.annotations.len(), 2);
        assert!(publication.annotation("imex curation").is_some());
        let coverage = publication.annotation("full coverage").unwrap();
        assert_eq!(coverage.text.as_deref(), Some(FULL_COVERAGE_TEXT));

        // Re-running replaces rather than duplicates
        ImexAssigner::apply_coverage_annotations(&mut publication);
        assert_eq!(publication.annotations.len(), 2);
    }

    #[test]
    fn test_coverage_annotations_partial() {
        let mut publication = publication_with_interactions(&["EBI-I1"]);
        publication.experiments[0].interactions[0].participants.clear();
        ImexAssigner::apply_coverage_annotations(&mut publication);

        assert!(publication.annotation("partial coverage").is_some());
        assert!(publication.annotation("full coverage").is_none());
    }

    #[test]
    fn test_propagate_assigns_distinct_suffixes() {
        let mut publication = publication_with_interactions(&["EBI-I1", "EBI-I2"]);
        let acc = accession("IM-3");
        let summary = ImexAssigner::propagate(&mut publication, &acc);

        assert_eq!(summary.experiments_updated, 1);
        assert_eq!(summary.interactions_assigned.len(), 2);

        let ids: Vec<&str> = summary
            .interactions_assigned
            .iter()
            .map(|(_, id)| id.as_str())
            .collect();
        assert_eq!(ids, vec!["IM-3-1", "IM-3-2"]);
    }

    #[test]
    fn test_propagate_is_idempotent() {
        let mut publication = publication_with_interactions(&["EBI-I1", "EBI-I2"]);
        let acc = accession("IM-3");
        ImexAssigner::propagate(&mut publication, &acc);
        let snapshot = publication.clone();

        let summary = ImexAssigner::propagate(&mut publication, &acc);
        assert_eq!(publication, snapshot);
        assert_eq!(summary.experiments_updated, 0);
        assert!(summary.interactions_assigned.is_empty());
    }

    #[test]
    fn test_propagate_skips_conflicting_experiment() {
        let mut publication = publication_with_interactions(&["EBI-I1"]);
        publication.experiments[0]
            .xrefs
            .push(Xref::imex_primary(&accession("IM-99")));

        let summary = ImexAssigner::propagate(&mut publication, &accession("IM-3"));
        assert_eq!(summary.experiments_updated, 0);
        assert_eq!(
            summary.experiment_conflicts,
            vec![("EBI-E1".to_string(), "IM-99".to_string())]
        );
        // The experiment keeps exactly its pre-existing reference
        assert_eq!(publication.experiments[0].xrefs.len(), 1);
        // Interactions still get ids
        assert_eq!(summary.interactions_assigned.len(), 1);
    }

    #[test]
    fn test_propagate_continues_counter_after_existing_ids() {
        let mut publication = publication_with_interactions(&["EBI-I1", "EBI-I2"]);
        publication.experiments[0].interactions[0]
            .xrefs
            .push(Xref::imex_interaction("IM-3-5"));

        let summary = ImexAssigner::propagate(&mut publication, &accession("IM-3"));
        assert_eq!(
            summary.interactions_assigned,
            vec![("EBI-I2".to_string(), "IM-3-6".to_string())]
        );
    }

    #[test]
    fn test_next_suffix_ignores_foreign_accessions() {
        let mut publication = publication_with_interactions(&["EBI-I1"]);
        publication.experiments[0].interactions[0]
            .xrefs
            .push(Xref::imex_interaction("IM-99-7"));

        assert_eq!(
            ImexAssigner::next_interaction_suffix(&publication, &accession("IM-3")),
            1
        );
    }
}
