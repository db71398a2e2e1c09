//! PSI-MI TAB (MITAB) export and import
//!
//! Tab-separated binary-interaction records. Column layout written and read
//! here, one field list per column joined with `|`, empty columns as `-`:
//!
//!  1. interactor A identifier        2. interactor B identifier
//!  3. alternative identifiers A      4. alternative identifiers B
//!  5. aliases A                      6. aliases B
//!  7. interaction detection methods  8. first author
//!  9. publication identifiers      10. taxonomy A
//! 11. taxonomy B                   12. interaction types
//! 13. source databases             14. interaction identifiers
//! 15. confidence scores            16. expansion method
//! 17. checksum A (crc64)           18. checksum B (crc64)
//! 19. interaction checksum (rigid) 20. annotations

pub mod reader;
pub mod writer;

pub use reader::MitabReader;
pub use writer::MitabWriter;

use midex_common::checksum;
use midex_core::model::{InteractionEvidence, Publication};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Number of columns in one MITAB row
pub const COLUMN_COUNT: usize = 20;

/// The empty-column marker
pub const EMPTY: &str = "-";

/// One `db:id(text)` field of a MITAB column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MitabField {
    pub db: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MitabField {
    pub fn new(db: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            id: id.into(),
            text: None,
        }
    }

    pub fn with_text(db: impl Into<String>, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            db: db.into(),
            id: id.into(),
            text: Some(text.into()),
        }
    }

    /// Parse a `db:id` or `db:id(text)` field
    pub fn parse(value: &str) -> Option<Self> {
        let (head, text) = match value.find('(') {
            Some(open) if value.ends_with(')') => {
                (&value[..open], Some(value[open + 1..value.len() - 1].to_string()))
            },
            _ => (value, None),
        };
        let (db, id) = head.split_once(':')?;
        if db.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self {
            db: db.to_string(),
            id: id.to_string(),
            text,
        })
    }
}

impl fmt::Display for MitabField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}:{}({})", self.db, self.id, text),
            None => write!(f, "{}:{}", self.db, self.id),
        }
    }
}

/// One binary interaction row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BinaryInteraction {
    pub id_a: Option<MitabField>,
    pub id_b: Option<MitabField>,
    pub alt_ids_a: Vec<MitabField>,
    pub alt_ids_b: Vec<MitabField>,
    pub aliases_a: Vec<MitabField>,
    pub aliases_b: Vec<MitabField>,
    pub detection_methods: Vec<MitabField>,
    pub first_author: Option<String>,
    pub publications: Vec<MitabField>,
    pub taxid_a: Vec<MitabField>,
    pub taxid_b: Vec<MitabField>,
    pub interaction_types: Vec<MitabField>,
    pub source_databases: Vec<MitabField>,
    pub interaction_ids: Vec<MitabField>,
    pub confidences: Vec<MitabField>,
    pub expansion: Option<String>,
    pub checksum_a: Option<MitabField>,
    pub checksum_b: Option<MitabField>,
    pub interaction_checksum: Option<MitabField>,
    pub annotations: Vec<MitabField>,
}

/// Expansion method label for n-ary interactions flattened around the first
/// participant
pub const SPOKE_EXPANSION: &str = "spoke";

/// Flatten a publication into binary rows. Two-participant evidences map to
/// one row; n-ary evidences are spoke-expanded around the first participant;
/// evidences with fewer than two participants are skipped.
pub fn binary_interactions(publication: &Publication, source: &str) -> Vec<BinaryInteraction> {
    let mut rows = Vec::new();
    for experiment in &publication.experiments {
        for interaction in &experiment.interactions {
            match interaction.participants.len() {
                0 | 1 => {
                    debug!(
                        interaction = %interaction.ac,
                        participants = interaction.participants.len(),
                        "Skipping interaction with fewer than two participants"
                    );
                },
                2 => rows.push(binary_row(
                    publication,
                    experiment_detection(experiment),
                    interaction,
                    0,
                    1,
                    None,
                    source,
                )),
                _ => {
                    for other in 1..interaction.participants.len() {
                        rows.push(binary_row(
                            publication,
                            experiment_detection(experiment),
                            interaction,
                            0,
                            other,
                            Some(SPOKE_EXPANSION),
                            source,
                        ));
                    }
                },
            }
        }
    }
    rows
}

fn experiment_detection(
    experiment: &midex_core::model::Experiment,
) -> Option<&midex_core::model::CvTerm> {
    experiment.detection_method.as_ref()
}

fn taxid_field(taxid: i32, name: &Option<String>) -> MitabField {
    match name {
        Some(name) => MitabField::with_text("taxid", taxid.to_string(), name.clone()),
        None => MitabField::new("taxid", taxid.to_string()),
    }
}

fn binary_row(
    publication: &Publication,
    detection: Option<&midex_core::model::CvTerm>,
    interaction: &InteractionEvidence,
    a: usize,
    b: usize,
    expansion: Option<&str>,
    source: &str,
) -> BinaryInteraction {
    let interactor_a = &interaction.participants[a].interactor;
    let interactor_b = &interaction.participants[b].interactor;

    let mut row = BinaryInteraction {
        id_a: Some(MitabField::new(
            interactor_a.database.shortlabel.clone(),
            interactor_a.id.clone(),
        )),
        id_b: Some(MitabField::new(
            interactor_b.database.shortlabel.clone(),
            interactor_b.id.clone(),
        )),
        expansion: expansion.map(|s| s.to_string()),
        first_author: publication.first_author.clone(),
        ..Default::default()
    };

    for alias in &interactor_a.aliases {
        row.aliases_a
            .push(MitabField::with_text(source, alias.clone(), "gene name"));
    }
    for alias in &interactor_b.aliases {
        row.aliases_b
            .push(MitabField::with_text(source, alias.clone(), "gene name"));
    }

    if let Some(method) = detection {
        if let Some(mi) = &method.mi {
            row.detection_methods
                .push(MitabField::with_text("psi-mi", mi.clone(), method.shortlabel.clone()));
        }
    }

    row.publications.push(MitabField::new(
        publication.identifier.namespace.clone(),
        publication.identifier.id.clone(),
    ));
    if let Some(imex) = &publication.imex_accession {
        row.publications
            .push(MitabField::new("imex", imex.as_str()));
    }

    if let Some(taxid) = interactor_a.organism_taxid {
        row.taxid_a.push(taxid_field(taxid, &interactor_a.organism_name));
    }
    if let Some(taxid) = interactor_b.organism_taxid {
        row.taxid_b.push(taxid_field(taxid, &interactor_b.organism_name));
    }

    if let Some(interaction_type) = &interaction.interaction_type {
        if let Some(mi) = &interaction_type.mi {
            row.interaction_types.push(MitabField::with_text(
                "psi-mi",
                mi.clone(),
                interaction_type.shortlabel.clone(),
            ));
        }
    }

    row.source_databases
        .push(MitabField::new("psi-mi", source));

    row.interaction_ids
        .push(MitabField::new(source, interaction.ac.clone()));
    if let Some(imex) = interaction.imex_primary_ref() {
        row.interaction_ids
            .push(MitabField::new("imex", imex.id.clone()));
    }

    if let Some(sequence) = &interactor_a.sequence {
        row.checksum_a = Some(MitabField::new(
            "crc64",
            checksum::crc64(sequence.as_bytes()),
        ));
    }
    if let Some(sequence) = &interactor_b.sequence {
        row.checksum_b = Some(MitabField::new(
            "crc64",
            checksum::crc64(sequence.as_bytes()),
        ));
    }
    row.interaction_checksum = Some(MitabField::new(
        "rigid",
        checksum::rigid([interactor_a.identity(), interactor_b.identity()]),
    ));

    for annotation in &interaction.annotations {
        row.annotations.push(MitabField::new(
            annotation.topic.shortlabel.clone(),
            annotation.text.clone().unwrap_or_else(|| "-".to_string()),
        ));
    }

    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use midex_core::model::{
        Experiment, InteractionEvidence, Interactor, Participant, Publication,
    };
    use midex_common::PublicationId;

    fn publication_with_participants(count: usize) -> Publication {
        let participants: Vec<Participant> = (0..count)
            .map(|i| {
                Participant::new(
                    Interactor::protein(format!("P0000{}", i), format!("prot-{}", i))
                        .with_organism(9606, "Homo sapiens"),
                )
            })
            .collect();
        Publication::new("EBI-1", PublicationId::pmid("12345")).with_experiments(vec![
            Experiment::new("EBI-E1", "exp-1").with_interactions(vec![
                InteractionEvidence::new("EBI-I1", "int-1").with_participants(participants),
            ]),
        ])
    }

    #[test]
    fn test_field_parse_round_trip() {
        let field = MitabField::parse("uniprotkb:P12345").unwrap();
        assert_eq!(field.db, "uniprotkb");
        assert_eq!(field.id, "P12345");
        assert_eq!(field.to_string(), "uniprotkb:P12345");

        let with_text = MitabField::parse("psi-mi:MI:0018(two hybrid)").unwrap();
        assert_eq!(with_text.db, "psi-mi");
        assert_eq!(with_text.id, "MI:0018");
        assert_eq!(with_text.text.as_deref(), Some("two hybrid"));
        assert_eq!(with_text.to_string(), "psi-mi:MI:0018(two hybrid)");

        assert!(MitabField::parse("no-colon").is_none());
    }

    #[test]
    fn test_two_participants_make_one_row() {
        let rows = binary_interactions(&publication_with_participants(2), "intact");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].expansion.is_none());
        assert_eq!(rows[0].id_a.as_ref().unwrap().id, "P00000");
        assert_eq!(rows[0].id_b.as_ref().unwrap().id, "P00001");
    }

    #[test]
    fn test_nary_is_spoke_expanded() {
        let rows = binary_interactions(&publication_with_participants(4), "intact");
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.expansion.as_deref() == Some(SPOKE_EXPANSION)));
        // The first participant anchors every pair
        assert!(rows.iter().all(|r| r.id_a.as_ref().unwrap().id == "P00000"));
    }

    #[test]
    fn test_single_participant_is_skipped() {
        let rows = binary_interactions(&publication_with_participants(1), "intact");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_rigid_present_and_stable() {
        let rows_a = binary_interactions(&publication_with_participants(2), "intact");
        let rows_b = binary_interactions(&publication_with_participants(2), "intact");
        let rigid_a = rows_a[0].interaction_checksum.as_ref().unwrap();
        let rigid_b = rows_b[0].interaction_checksum.as_ref().unwrap();
        assert_eq!(rigid_a, rigid_b);
        assert_eq!(rigid_a.db, "rigid");
    }
}
