//! midex core library
//!
//! Domain model and IMEx reconciliation for the molecular-interaction
//! data-exchange layer:
//!
//! - **model**: publications, experiments, interaction evidences, xrefs,
//!   annotations, and CV terms
//! - **cv**: the run-scoped CV term registry
//! - **store**: the publication persistence boundary
//! - **imex**: registry client, accession reconciliation, batch updater,
//!   and run reports

pub mod cv;
pub mod imex;
pub mod model;
pub mod store;

// Re-export commonly used types
pub use cv::CvRegistry;
pub use model::{
    Annotation, CurationDepth, CvTerm, Experiment, InteractionEvidence, Interactor, Participant,
    Publication, Xref,
};
pub use store::{InMemoryStore, PublicationStore, StoreError};
