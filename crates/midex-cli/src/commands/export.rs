//! `midex export` commands

use crate::config::Config;
use anyhow::Context;
use chrono::Utc;
use midex_core::store::InMemoryStore;
use midex_core::PublicationStore;
use midex_export::{MitabWriter, PsiVersion, UniprotExporter, XmlExporter};
use std::path::PathBuf;
use tracing::info;

async fn load_publications(input: &PathBuf) -> anyhow::Result<Vec<midex_core::Publication>> {
    let store = InMemoryStore::from_json_file(input)
        .await
        .with_context(|| format!("Failed to load publications from {}", input.display()))?;
    // Stable export order, publications sorted by ac
    let mut publications = store.list_with_imex().await?;
    let mut candidates = store.list_imex_candidates().await?;
    publications.append(&mut candidates);
    publications.sort_by(|a, b| a.ac.cmp(&b.ac));
    Ok(publications)
}

/// Export PSI-MI XML
pub async fn xml(
    input: PathBuf,
    out: PathBuf,
    version: String,
    gzip: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let version = PsiVersion::parse(&version)
        .ok_or_else(|| anyhow::anyhow!("Unsupported PSI-MI version: {}", version))?;

    let publications = load_publications(&input).await?;
    let exporter = XmlExporter::new(version);
    exporter.export_to_file(&publications, &config.source, &out, gzip)?;

    println!(
        "Exported {} publications as PSI-MI {} to {}",
        publications.len(),
        version,
        out.display()
    );
    Ok(())
}

/// Export MITAB
pub async fn mitab(
    input: PathBuf,
    out: PathBuf,
    gzip: bool,
    no_header: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let publications = load_publications(&input).await?;

    let mut writer = MitabWriter::new(config.source.clone());
    if no_header {
        writer = writer.without_header();
    }
    writer.write_file(&publications, &out, gzip)?;

    println!(
        "Exported {} publications as MITAB to {}",
        publications.len(),
        out.display()
    );
    Ok(())
}

/// Export UniProt DR/CC/GO annotation lines
pub async fn uniprot(input: PathBuf, out_dir: PathBuf) -> anyhow::Result<()> {
    let config = Config::load()?;
    let publications = load_publications(&input).await?;

    let exporter = UniprotExporter::new("IntAct");
    let today = Utc::now().date_naive();
    exporter.write_files(&publications, &out_dir, today)?;

    info!(source = %config.source, "UniProt export complete");
    println!(
        "Exported UniProt annotation lines for {} publications to {}",
        publications.len(),
        out_dir.display()
    );
    Ok(())
}
