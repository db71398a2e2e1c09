//! `midex cv-cache` command

use anyhow::Context;
use midex_core::CvRegistry;
use std::path::PathBuf;

/// Build a JSON CV-term cache from a flat mapping file
pub async fn run(mapping: PathBuf, out: PathBuf, builtins: bool) -> anyhow::Result<()> {
    let mut registry = if builtins {
        CvRegistry::with_builtins()
    } else {
        CvRegistry::new()
    };

    let loaded = registry
        .load_flat_file(&mapping)
        .with_context(|| format!("Failed to load CV mappings from {}", mapping.display()))?;

    registry
        .save_json(&out)
        .with_context(|| format!("Failed to write CV cache to {}", out.display()))?;

    println!(
        "Loaded {} mappings ({} terms total) into {}",
        loaded,
        registry.len(),
        out.display()
    );
    Ok(())
}
