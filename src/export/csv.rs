//! CSV Export functionality
//!
//! Writes a list of transactions (typically the aggregator's filtered view)
//! as spreadsheet-compatible CSV.

use std::io::Write;

use crate::error::TrackerResult;
use crate::models::Transaction;

/// Column headers for transaction exports
pub const TRANSACTION_CSV_HEADER: [&str; 6] =
    ["ID", "Date", "Type", "Category", "Description", "Amount"];

/// Export transactions to CSV in the order given
///
/// Amounts are written unsigned with two decimals; the `Type` column
/// carries the direction.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> TrackerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(TRANSACTION_CSV_HEADER)?;

    for txn in transactions {
        csv_writer.write_record([
            txn.id.to_string(),
            txn.occurred_at.format("%Y-%m-%d").to_string(),
            txn.kind.to_string(),
            txn.category_name.clone(),
            txn.description.clone(),
            txn.amount.format_with_symbol(""),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
