//! Controlled-vocabulary terms
//!
//! A `CvTerm` pairs an optional PSI-MI identifier with a shortlabel. Terms
//! the exchange layer branches on are provided as constructors in [`psimi`];
//! everything else comes out of the run-scoped [`crate::cv::CvRegistry`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A controlled-vocabulary term: PSI-MI identifier plus shortlabel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CvTerm {
    /// PSI-MI identifier (e.g. "MI:0670"), absent for database-local topics
    pub mi: Option<String>,
    /// Human-readable shortlabel (e.g. "imex")
    pub shortlabel: String,
}

impl CvTerm {
    pub fn new(mi: impl Into<String>, shortlabel: impl Into<String>) -> Self {
        Self {
            mi: Some(mi.into()),
            shortlabel: shortlabel.into(),
        }
    }

    /// A database-local term without a PSI-MI identifier
    pub fn local(shortlabel: impl Into<String>) -> Self {
        Self {
            mi: None,
            shortlabel: shortlabel.into(),
        }
    }

    /// True if this term carries the given PSI-MI identifier
    pub fn is_mi(&self, mi: &str) -> bool {
        self.mi.as_deref() == Some(mi)
    }
}

impl fmt::Display for CvTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mi {
            Some(mi) => write!(f, "{} ({})", self.shortlabel, mi),
            None => write!(f, "{}", self.shortlabel),
        }
    }
}

/// Well-known PSI-MI terms the exchange layer depends on
pub mod psimi {
    use super::CvTerm;

    pub const IMEX_MI: &str = "MI:0670";
    pub const IMEX_PRIMARY_MI: &str = "MI:0662";
    pub const PUBMED_MI: &str = "MI:0446";
    pub const DOI_MI: &str = "MI:0574";
    pub const PROTEIN_MI: &str = "MI:0326";
    pub const IDENTITY_MI: &str = "MI:0356";
    pub const UNIPROTKB_MI: &str = "MI:0486";
    pub const INTACT_MI: &str = "MI:0469";
    pub const PSI_MI_MI: &str = "MI:0488";
    pub const IMEX_CURATION_MI: &str = "MI:0959";
    pub const FULL_COVERAGE_MI: &str = "MI:0957";
    pub const PARTIAL_COVERAGE_MI: &str = "MI:0958";
    pub const CURATION_DEPTH_MI: &str = "MI:0955";

    /// Shortlabel of the local topic marking a publication as never
    /// assignable to IMEx, set by curators.
    pub const IMEX_UNASSIGNABLE: &str = "imex-unassignable";

    pub fn imex() -> CvTerm {
        CvTerm::new(IMEX_MI, "imex")
    }

    pub fn imex_primary() -> CvTerm {
        CvTerm::new(IMEX_PRIMARY_MI, "imex-primary")
    }

    pub fn pubmed() -> CvTerm {
        CvTerm::new(PUBMED_MI, "pubmed")
    }

    pub fn doi() -> CvTerm {
        CvTerm::new(DOI_MI, "doi")
    }

    pub fn protein() -> CvTerm {
        CvTerm::new(PROTEIN_MI, "protein")
    }

    pub fn identity() -> CvTerm {
        CvTerm::new(IDENTITY_MI, "identity")
    }

    pub fn uniprotkb() -> CvTerm {
        CvTerm::new(UNIPROTKB_MI, "uniprotkb")
    }

    pub fn intact() -> CvTerm {
        CvTerm::new(INTACT_MI, "intact")
    }

    pub fn psi_mi() -> CvTerm {
        CvTerm::new(PSI_MI_MI, "psi-mi")
    }

    pub fn imex_curation() -> CvTerm {
        CvTerm::new(IMEX_CURATION_MI, "imex curation")
    }

    pub fn full_coverage() -> CvTerm {
        CvTerm::new(FULL_COVERAGE_MI, "full coverage")
    }

    pub fn partial_coverage() -> CvTerm {
        CvTerm::new(PARTIAL_COVERAGE_MI, "partial coverage")
    }

    pub fn curation_depth() -> CvTerm {
        CvTerm::new(CURATION_DEPTH_MI, "curation depth")
    }

    pub fn imex_unassignable() -> CvTerm {
        CvTerm::local(IMEX_UNASSIGNABLE)
    }
}
