//! `midex imex-update` command

use crate::config::Config;
use crate::progress;
use anyhow::Context;
use midex_core::imex::{
    GlobalImexUpdater, HttpImexCentralClient, ImexCentralClient, ImexCentralManager,
    ReportCollector, StubRegistry,
};
use midex_core::store::InMemoryStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Run the IMEx reconciliation batch over a publication snapshot file
pub async fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    reports_dir: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let reports_dir =
        reports_dir.unwrap_or_else(|| PathBuf::from(config.reports_dir.clone()));

    let store = Arc::new(
        InMemoryStore::from_json_file(&input)
            .await
            .with_context(|| format!("Failed to load publications from {}", input.display()))?,
    );
    let loaded = store.len().await;
    info!(publications = loaded, input = %input.display(), "Loaded publication snapshot");

    let client: Arc<dyn ImexCentralClient> = if dry_run {
        info!("Dry run: using the in-memory registry, nothing leaves this machine");
        Arc::new(StubRegistry::new())
    } else {
        Arc::new(HttpImexCentralClient::new(
            config.registry.url.clone(),
            config.registry.credentials(),
        )?)
    };

    let manager = ImexCentralManager::new(client, config.eligibility.clone());
    let updater = GlobalImexUpdater::new(manager, store.clone());

    let spinner = progress::create_spinner("Reconciling publications against IMEx Central");
    let mut collector = ReportCollector::new();
    let stats = updater.run(&mut collector).await?;
    spinner.finish_and_clear();

    collector
        .write_csv_reports(&reports_dir)
        .with_context(|| format!("Failed to write reports to {}", reports_dir.display()))?;

    let output = output.unwrap_or_else(|| input.clone());
    store
        .to_json_file(&output)
        .await
        .with_context(|| format!("Failed to write publications to {}", output.display()))?;

    println!(
        "Processed {} publications: {} updated, {} newly assigned, {} conflicts, {} skipped, {} failed",
        stats.processed,
        stats.updated,
        stats.newly_assigned,
        stats.conflicts,
        stats.skipped,
        stats.failed,
    );
    println!("Reports written to {}", reports_dir.display());

    if collector.has_conflicts() {
        println!("Conflicts need manual review, see the reports");
    }

    Ok(())
}
