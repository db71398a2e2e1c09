//! PSI-MI XML export
//!
//! Document generation for the three schema levels. Version differences are
//! concentrated in one strategy object per schema version behind
//! [`builder::ElementBuilder`], selected once per export session instead of
//! being branched on at every element.

pub mod builder;
pub mod writer;

pub use builder::{builder_for, ElementBuilder};
pub use writer::XmlExporter;

use serde::{Deserialize, Serialize};

/// PSI-MI schema version of one export session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PsiVersion {
    /// PSI-MI level 1
    V1,
    /// PSI-MI level 2 (pre-2.5 release)
    V2,
    /// PSI-MI level 2.5
    #[default]
    V25,
}

impl PsiVersion {
    /// XML namespace pinned for this version
    pub fn namespace(&self) -> &'static str {
        match self {
            PsiVersion::V1 | PsiVersion::V2 => "net:sf:psidev:mi",
            PsiVersion::V25 => "http://psi.hupo.org/mi/mif",
        }
    }

    /// `xsi:schemaLocation` value pinned for this version
    pub fn schema_location(&self) -> &'static str {
        match self {
            PsiVersion::V1 => {
                "net:sf:psidev:mi http://psidev.sourceforge.net/mi/xml/src/MIF.xsd"
            },
            PsiVersion::V2 => {
                "net:sf:psidev:mi http://psidev.sourceforge.net/mi/rel2/src/MIF2.xsd"
            },
            PsiVersion::V25 => {
                "http://psi.hupo.org/mi/mif http://psidev.sourceforge.net/mi/rel25/src/MIF254.xsd"
            },
        }
    }

    /// (level, version, minorVersion) attribute triple; minor is only
    /// emitted when present
    pub fn level_attrs(&self) -> (u8, u8, Option<u8>) {
        match self {
            PsiVersion::V1 => (1, 1, None),
            PsiVersion::V2 => (2, 1, None),
            PsiVersion::V25 => (2, 5, Some(4)),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1" | "1.0" => Some(PsiVersion::V1),
            "2" | "2.0" => Some(PsiVersion::V2),
            "2.5" | "25" => Some(PsiVersion::V25),
            _ => None,
        }
    }
}

impl std::fmt::Display for PsiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PsiVersion::V1 => write!(f, "1"),
            PsiVersion::V2 => write!(f, "2"),
            PsiVersion::V25 => write!(f, "2.5"),
        }
    }
}
