//! Integration tests for MITAB write/read behavior

use midex_common::{ImexAccession, PublicationId};
use midex_core::model::{
    CurationDepth, CvTerm, Experiment, InteractionEvidence, Interactor, Participant, Publication,
    Xref,
};
use midex_export::{MitabReader, MitabWriter};

fn curated_publication() -> Publication {
    let mut interaction = InteractionEvidence::new("EBI-I1", "tp53-mdm2").with_participants(vec![
        Participant::new(
            Interactor::protein("P04637", "tp53_human")
                .with_organism(9606, "Homo sapiens")
                .with_sequence("MEEPQSDPSV"),
        ),
        Participant::new(
            Interactor::protein("Q00987", "mdm2_human")
                .with_organism(9606, "Homo sapiens")
                .with_sequence("MCNTNMSVPT"),
        ),
    ]);
    interaction.interaction_type = Some(CvTerm::new("MI:0915", "physical association"));
    interaction.xrefs.push(Xref::imex_interaction("IM-3-1"));

    let mut publication = Publication::new("EBI-1", PublicationId::pmid("18212739"))
        .with_depth(CurationDepth::Imex)
        .with_experiments(vec![Experiment::new("EBI-E1", "exp-1")
            .with_detection_method(CvTerm::new("MI:0018", "two hybrid"))
            .with_interactions(vec![interaction])]);
    publication.imex_accession = Some(ImexAccession::parse("IM-3").unwrap());
    publication.first_author = Some("Smith J. (2008)".to_string());
    publication
}

#[test]
fn written_rows_parse_back_with_the_same_content() {
    let writer = MitabWriter::new("intact");
    let document = writer.write_string(&[curated_publication()]).unwrap();

    let rows = MitabReader::new().read_str(&document).unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.id_a.as_ref().unwrap().id, "P04637");
    assert_eq!(row.id_b.as_ref().unwrap().id, "Q00987");
    assert_eq!(row.detection_methods[0].id, "MI:0018");
    assert_eq!(row.detection_methods[0].text.as_deref(), Some("two hybrid"));
    assert_eq!(row.first_author.as_deref(), Some("Smith J. (2008)"));

    // Publication column carries both the pmid and the IMEx accession
    assert!(row.publications.iter().any(|f| f.db == "pmid" && f.id == "18212739"));
    assert!(row.publications.iter().any(|f| f.db == "imex" && f.id == "IM-3"));

    // Interaction ids carry the source ac and the per-interaction IMEx id
    assert!(row.interaction_ids.iter().any(|f| f.db == "intact" && f.id == "EBI-I1"));
    assert!(row.interaction_ids.iter().any(|f| f.db == "imex" && f.id == "IM-3-1"));

    // Checksums: crc64 per interactor, rigid for the pair
    assert_eq!(row.checksum_a.as_ref().unwrap().db, "crc64");
    assert_eq!(row.checksum_b.as_ref().unwrap().db, "crc64");
    assert_eq!(row.interaction_checksum.as_ref().unwrap().db, "rigid");
    assert_ne!(
        row.checksum_a.as_ref().unwrap().id,
        row.checksum_b.as_ref().unwrap().id
    );
}

#[test]
fn taxids_carry_organism_names() {
    let writer = MitabWriter::new("intact").without_header();
    let document = writer.write_string(&[curated_publication()]).unwrap();
    let rows = MitabReader::new().read_str(&document).unwrap();

    let taxid = &rows[0].taxid_a[0];
    assert_eq!(taxid.db, "taxid");
    assert_eq!(taxid.id, "9606");
    assert_eq!(taxid.text.as_deref(), Some("Homo sapiens"));
}

#[test]
fn gzipped_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("interactions.txt.gz");

    let writer = MitabWriter::new("intact");
    writer
        .write_file(&[curated_publication()], &path, true)
        .unwrap();

    let rows = MitabReader::new().read_file(&path).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id_a.as_ref().unwrap().id, "P04637");
}
