//! `midex validate-mitab` command

use anyhow::Context;
use midex_export::MitabReader;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Parse a MITAB file and summarize what it contains
pub async fn run(input: PathBuf, limit: Option<usize>) -> anyhow::Result<()> {
    let reader = match limit {
        Some(limit) => MitabReader::with_limit(limit),
        None => MitabReader::new(),
    };

    let rows = reader
        .read_file(&input)
        .with_context(|| format!("Failed to parse MITAB from {}", input.display()))?;

    let mut publications: BTreeSet<String> = BTreeSet::new();
    let mut imex_ids: BTreeSet<String> = BTreeSet::new();
    for row in &rows {
        for field in &row.publications {
            publications.insert(field.to_string());
        }
        for field in row.interaction_ids.iter().filter(|f| f.db == "imex") {
            imex_ids.insert(field.id.clone());
        }
    }

    println!(
        "{}: {} binary interactions, {} publication identifiers, {} IMEx interaction ids",
        input.display(),
        rows.len(),
        publications.len(),
        imex_ids.len()
    );
    Ok(())
}
