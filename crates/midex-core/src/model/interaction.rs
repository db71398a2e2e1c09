//! Interactors, participants, and interaction evidences

use super::cv::{psimi, CvTerm};
use super::xref::{Annotation, Xref};
use serde::{Deserialize, Serialize};

/// A molecule taking part in interactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactor {
    /// Primary identifier in its source database (e.g. a UniProt accession)
    pub id: String,
    /// Source database of the primary identifier
    pub database: CvTerm,
    pub shortlabel: String,
    /// Interactor type (protein, small molecule, nucleic acid, ...)
    pub interactor_type: CvTerm,
    /// NCBI taxonomy id of the source organism
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organism_taxid: Option<i32>,
    /// Organism name for display columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organism_name: Option<String>,
    /// Amino-acid sequence, when known (drives the CRC64 checksum column)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
    /// Alternative labels (gene names, synonyms)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl Interactor {
    /// A protein interactor identified by a UniProt accession
    pub fn protein(id: impl Into<String>, shortlabel: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            database: psimi::uniprotkb(),
            shortlabel: shortlabel.into(),
            interactor_type: psimi::protein(),
            organism_taxid: None,
            organism_name: None,
            sequence: None,
            aliases: Vec::new(),
        }
    }

    pub fn with_organism(mut self, taxid: i32, name: impl Into<String>) -> Self {
        self.organism_taxid = Some(taxid);
        self.organism_name = Some(name.into());
        self
    }

    pub fn with_sequence(mut self, sequence: impl Into<String>) -> Self {
        self.sequence = Some(sequence.into());
        self
    }

    pub fn is_protein(&self) -> bool {
        self.interactor_type.is_mi(psimi::PROTEIN_MI)
    }

    /// The `db:id` identity string used by the RIGID digest
    pub fn identity(&self) -> String {
        format!("{}:{}", self.database.shortlabel, self.id)
    }
}

/// One participant of an interaction evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub interactor: Interactor,
    /// Experimental role (bait, prey, ...), when curated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experimental_role: Option<CvTerm>,
}

impl Participant {
    pub fn new(interactor: Interactor) -> Self {
        Self {
            interactor,
            experimental_role: None,
        }
    }

    pub fn with_role(mut self, role: CvTerm) -> Self {
        self.experimental_role = Some(role);
        self
    }
}

/// A single curated interaction observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvidence {
    /// Database-internal accession (e.g. "EBI-1234567")
    pub ac: String,
    pub shortlabel: String,
    /// Interaction type (physical association, direct interaction, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<CvTerm>,
    pub participants: Vec<Participant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub xrefs: Vec<Xref>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl InteractionEvidence {
    pub fn new(ac: impl Into<String>, shortlabel: impl Into<String>) -> Self {
        Self {
            ac: ac.into(),
            shortlabel: shortlabel.into(),
            interaction_type: None,
            participants: Vec::new(),
            xrefs: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }

    /// True if every participant is a protein and there is at least one
    pub fn is_protein_protein(&self) -> bool {
        !self.participants.is_empty()
            && self.participants.iter().all(|p| p.interactor.is_protein())
    }

    /// The (imex, imex-primary) Xref carried by this interaction, if any
    pub fn imex_primary_ref(&self) -> Option<&Xref> {
        self.xrefs.iter().find(|x| x.is_imex_primary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::cv::CvTerm;

    #[test]
    fn test_protein_protein_detection() {
        let mut evidence = InteractionEvidence::new("EBI-1", "int-1").with_participants(vec![
            Participant::new(Interactor::protein("P12345", "tp53_human")),
            Participant::new(Interactor::protein("Q67890", "mdm2_human")),
        ]);
        assert!(evidence.is_protein_protein());

        evidence.participants.push(Participant::new(Interactor {
            id: "CHEBI:15377".to_string(),
            database: CvTerm::new("MI:0474", "chebi"),
            shortlabel: "water".to_string(),
            interactor_type: CvTerm::new("MI:0328", "small molecule"),
            organism_taxid: None,
            organism_name: None,
            sequence: None,
            aliases: Vec::new(),
        }));
        assert!(!evidence.is_protein_protein());
    }

    #[test]
    fn test_empty_interaction_is_not_protein_protein() {
        let evidence = InteractionEvidence::new("EBI-2", "int-2");
        assert!(!evidence.is_protein_protein());
    }

    #[test]
    fn test_identity_string() {
        let interactor = Interactor::protein("P12345", "tp53_human");
        assert_eq!(interactor.identity(), "uniprotkb:P12345");
    }
}
