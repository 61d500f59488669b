//! Summary CLI command
//!
//! The overview screen: balance, totals, expense breakdown and the most
//! recent transactions.

use std::fs::File;
use std::path::Path;

use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::services::TransactionAggregator;
use crate::storage::Storage;

/// Handle the summary command
///
/// With `csv_path`, the category breakdown is also written there.
pub fn handle_summary_command(
    storage: &Storage,
    settings: &Settings,
    user_id: &str,
    csv_path: Option<&Path>,
) -> TrackerResult<()> {
    let mut aggregator = TransactionAggregator::new();
    aggregator.refresh_from(storage, user_id)?;
    let summary = aggregator.current_summary();

    println!("Summary for {}", user_id);
    println!("{}", "=".repeat(50));
    print!("{}", summary.format_terminal(&settings.currency_symbol));

    if let Some(path) = csv_path {
        let file = File::create(path).map_err(|e| {
            TrackerError::Export(format!("Cannot create {}: {}", path.display(), e))
        })?;
        summary.export_breakdown_csv(file)?;
        println!("\nCategory breakdown written to {}", path.display());
    }

    Ok(())
}
