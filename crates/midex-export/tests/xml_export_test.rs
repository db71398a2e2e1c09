//! Integration tests for the PSI-MI XML writer

use midex_common::{ImexAccession, PublicationId};
use midex_core::model::{
    CvTerm, Experiment, InteractionEvidence, Interactor, Participant, Publication, Xref,
};
use midex_export::{PsiVersion, XmlExporter};

fn sample_publication() -> Publication {
    let two_hybrid = CvTerm::new("MI:0018", "two hybrid");
    let association = CvTerm::new("MI:0915", "physical association");

    let mut interaction = InteractionEvidence::new("EBI-I1", "tp53-mdm2").with_participants(vec![
        Participant::new(
            Interactor::protein("P04637", "tp53_human").with_organism(9606, "Homo sapiens"),
        ),
        Participant::new(
            Interactor::protein("Q00987", "mdm2_human").with_organism(9606, "Homo sapiens"),
        ),
    ]);
    interaction.interaction_type = Some(association);
    interaction
        .xrefs
        .push(Xref::imex_interaction("IM-3-1"));

    let mut experiment = Experiment::new("EBI-E1", "exp-1")
        .with_detection_method(two_hybrid)
        .with_interactions(vec![interaction]);
    experiment
        .xrefs
        .push(Xref::imex_primary(&ImexAccession::parse("IM-3").unwrap()));

    Publication::new("EBI-1", PublicationId::pmid("18212739"))
        .with_experiments(vec![experiment])
}

#[test]
fn v25_document_has_the_expected_shape() {
    let exporter = XmlExporter::new(PsiVersion::V25);
    let document = exporter.export(&[sample_publication()], "intact").unwrap();

    assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(document.contains("xmlns=\"http://psi.hupo.org/mi/mif\""));
    assert!(document.contains("MIF254.xsd"));
    assert!(document.contains("level=\"2\""));
    assert!(document.contains("version=\"5\""));
    assert!(document.contains("minorVersion=\"4\""));

    // entrySet > entry > source/experimentList/interactorList/interactionList
    assert!(document.contains("<entrySet"));
    assert!(document.contains("<entry>"));
    assert!(document.contains("<source>"));
    assert!(document.contains("<experimentList>"));
    assert!(document.contains("<interactorList>"));
    assert!(document.contains("<interactionList>"));

    // 2.5 element names
    assert!(document.contains("<interactor id="));
    assert!(document.contains("<participant id="));
    assert!(document.contains("<interactorRef>"));

    // bibref and the imex references survive
    assert!(document.contains("db=\"pmid\" id=\"18212739\" refType=\"primary-reference\""));
    assert!(document.contains("db=\"imex\" id=\"IM-3\" refType=\"imex-primary\""));
    assert!(document.contains("db=\"imex\" id=\"IM-3-1\" refType=\"imex-primary\""));
    assert!(document.contains("ncbiTaxId=\"9606\""));
}

#[test]
fn v1_document_uses_protein_element_names() {
    let exporter = XmlExporter::new(PsiVersion::V1);
    let document = exporter.export(&[sample_publication()], "intact").unwrap();

    assert!(document.contains("xmlns=\"net:sf:psidev:mi\""));
    assert!(document.contains("MIF.xsd"));
    assert!(document.contains("level=\"1\""));
    assert!(document.contains("<proteinInteractor id="));
    assert!(document.contains("<proteinParticipant id="));
    assert!(document.contains("<proteinInteractorRef>"));
    assert!(!document.contains("<interactor id="));
}

#[test]
fn v2_document_pins_its_own_schema() {
    let exporter = XmlExporter::new(PsiVersion::V2);
    let document = exporter.export(&[sample_publication()], "intact").unwrap();

    assert!(document.contains("MIF2.xsd"));
    assert!(document.contains("level=\"2\""));
    assert!(document.contains("version=\"1\""));
    assert!(!document.contains("minorVersion"));
}

#[test]
fn shared_interactors_are_serialized_once() {
    let mut publication = sample_publication();
    // A second interaction reusing both interactors
    let second = InteractionEvidence::new("EBI-I2", "tp53-mdm2-2").with_participants(vec![
        Participant::new(Interactor::protein("P04637", "tp53_human")),
        Participant::new(Interactor::protein("Q00987", "mdm2_human")),
    ]);
    publication.experiments[0].interactions.push(second);

    let exporter = XmlExporter::new(PsiVersion::V25);
    let document = exporter.export(&[publication], "intact").unwrap();

    assert_eq!(document.matches("<interaction id=").count(), 2);
    // Interactors appear once each in the interactorList
    assert_eq!(document.matches("<interactor id=").count(), 2);
    assert_eq!(document.matches("<interactorRef>").count(), 4);
}

#[test]
fn interaction_annotations_are_attributes_on_25_only() {
    let mut publication = sample_publication();
    publication.experiments[0].interactions[0]
        .annotations
        .push(midex_core::model::Annotation::with_text(
            CvTerm::local("comment"),
            "curated remark",
        ));

    let v25 = XmlExporter::new(PsiVersion::V25)
        .export(std::slice::from_ref(&publication), "intact")
        .unwrap();
    assert!(v25.contains("<attributeList>"));
    assert!(v25.contains("attribute name=\"comment\""));
    assert!(v25.contains("curated remark"));

    let v1 = XmlExporter::new(PsiVersion::V1)
        .export(std::slice::from_ref(&publication), "intact")
        .unwrap();
    assert!(!v1.contains("<attributeList>"));
}

#[test]
fn gzip_export_round_trips() {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.xml.gz");

    let exporter = XmlExporter::new(PsiVersion::V25);
    exporter
        .export_to_file(&[sample_publication()], "intact", &path, true)
        .unwrap();

    let mut decoder = GzDecoder::new(std::fs::File::open(&path).unwrap());
    let mut document = String::new();
    decoder.read_to_string(&mut document).unwrap();
    assert!(document.contains("<entrySet"));
}
