//! midex common library
//!
//! Shared types, utilities, and error handling for the midex workspace:
//!
//! - **Error handling**: the workspace-wide error and result types
//! - **Identifiers**: IMEx accession and publication identifier newtypes
//! - **Checksums**: CRC64 and RIGID digests used by the MITAB export
//! - **Logging**: tracing subscriber bootstrap for the batch drivers

pub mod checksum;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{MidexError, Result};
pub use types::{ImexAccession, PublicationId};
