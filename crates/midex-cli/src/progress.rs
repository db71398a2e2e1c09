//! Progress indicators for batch runs

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Bar over a known number of publications
pub fn publication_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.green/dim} {pos}/{len} publications {msg}")
            .expect("Invalid progress bar template"),
    );
    pb
}

/// Spinner for operations of unknown length (registry round trips)
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
