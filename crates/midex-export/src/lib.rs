//! midex export library
//!
//! Format converters off the domain model: pure mapping from publication
//! snapshots to PSI-MI XML documents, MITAB records, and UniProt flat-file
//! annotation lines. Per-run caches (element id maps) are owned by the
//! export session, never global.

pub mod mitab;
pub mod uniprot;
pub mod xml;

// Re-export commonly used types
pub use mitab::{BinaryInteraction, MitabField, MitabReader, MitabWriter};
pub use uniprot::UniprotExporter;
pub use xml::{PsiVersion, XmlExporter};
