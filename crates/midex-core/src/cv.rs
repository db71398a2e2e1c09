//! Run-scoped CV term registry
//!
//! Lookup cache from PSI-MI reference to term, owned by the batch-run
//! context and passed by reference into whatever needs it. Populated from
//! the built-in terms, a flat mapping file, or a previously saved JSON
//! snapshot. Unknown references are data errors for the report, not panics.

use crate::model::cv::{psimi, CvTerm};
use midex_common::{MidexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// MI-reference -> term lookup cache for one batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CvRegistry {
    by_mi: HashMap<String, CvTerm>,
}

impl CvRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the terms the exchange layer branches on
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for term in [
            psimi::imex(),
            psimi::imex_primary(),
            psimi::pubmed(),
            psimi::doi(),
            psimi::protein(),
            psimi::identity(),
            psimi::uniprotkb(),
            psimi::intact(),
            psimi::psi_mi(),
            psimi::imex_curation(),
            psimi::full_coverage(),
            psimi::partial_coverage(),
            psimi::curation_depth(),
        ] {
            registry.insert(term);
        }
        registry
    }

    pub fn insert(&mut self, term: CvTerm) {
        if let Some(mi) = term.mi.clone() {
            self.by_mi.insert(mi, term);
        }
    }

    pub fn get(&self, mi: &str) -> Option<&CvTerm> {
        self.by_mi.get(mi)
    }

    pub fn len(&self) -> usize {
        self.by_mi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_mi.is_empty()
    }

    /// Load additional mappings from a flat file of `MI:xxxx<TAB>shortlabel`
    /// lines. Blank lines and `#` comments are skipped; malformed lines are
    /// logged and skipped.
    pub fn load_flat_file(&mut self, path: &Path) -> Result<usize> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let mut loaded = 0;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match trimmed.split_once('\t') {
                Some((mi, shortlabel)) if mi.starts_with("MI:") && !shortlabel.is_empty() => {
                    self.insert(CvTerm::new(mi.trim(), shortlabel.trim()));
                    loaded += 1;
                },
                _ => {
                    warn!(
                        line = line_no + 1,
                        path = %path.display(),
                        "Skipping malformed CV mapping line"
                    );
                },
            }
        }

        debug!(loaded, path = %path.display(), "Loaded CV mappings");
        Ok(loaded)
    }

    /// Persist the registry as JSON (replaces the old serialized-object cache)
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Restore a registry saved with [`save_json`](Self::save_json)
    pub fn load_json(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let registry = serde_json::from_str(&data)?;
        Ok(registry)
    }

    /// Resolve an MI reference, failing with a data error when unknown
    pub fn resolve(&self, mi: &str) -> Result<&CvTerm> {
        self.get(mi)
            .ok_or_else(|| MidexError::Parse(format!("Unknown CV reference: {}", mi)))
    }
}
