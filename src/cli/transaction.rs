//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management. Listing and export go
//! through the aggregator so the search and kind filters behave exactly as
//! they do everywhere else.

use std::fs::File;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{TrackerError, TrackerResult};
use crate::export::export_transactions_csv;
use crate::models::{Money, TransactionKind};
use crate::services::{
    CreateTransactionInput, TransactionAggregator, TransactionService, UpdateTransactionInput,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Amount (e.g., "50.00" or "1,200")
        amount: String,
        /// Transaction type (income or expense)
        #[arg(short, long, default_value = "expense")]
        kind: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        date: Option<String>,
    },
    /// List transactions, newest first
    List {
        /// Case-insensitive search over description and category
        #[arg(short, long)]
        search: Option<String>,
        /// Only show income or expense
        #[arg(short, long)]
        kind: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New type (income or expense)
        #[arg(short, long)]
        kind: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New date
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// Export the filtered transaction list to CSV
    Export {
        /// Output file
        file: PathBuf,
        /// Case-insensitive search over description and category
        #[arg(short, long)]
        search: Option<String>,
        /// Only export income or expense
        #[arg(short, long)]
        kind: Option<String>,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    user_id: &str,
    cmd: TransactionCommands,
) -> TrackerResult<()> {
    let service = TransactionService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            amount,
            kind,
            category,
            description,
            date,
        } => {
            let input = CreateTransactionInput {
                user_id: user_id.to_string(),
                amount: parse_amount(&amount)?,
                kind: parse_kind(&kind)?,
                category,
                description,
                occurred_at: date.as_deref().map(parse_date).transpose()?,
            };

            let txn = service.create(input)?;

            println!("Created transaction:");
            println!("  ID:       {}", txn.id.short());
            println!("  Date:     {}", txn.occurred_at.format(&settings.date_format));
            println!(
                "  Amount:   {}{}",
                txn.kind.sign(),
                txn.amount.format_with_symbol(symbol)
            );
            println!("  Category: {}", txn.category_name);
            if !txn.description.is_empty() {
                println!("  Note:     {}", txn.description);
            }
        }

        TransactionCommands::List {
            search,
            kind,
            limit,
        } => {
            let aggregator = filtered(storage, user_id, search, kind)?;
            let view = aggregator.current_filtered_view();
            let shown = &view[..view.len().min(limit)];

            print!("{}", format_transaction_register(shown, symbol));
            println!(
                "\nShowing {} of {} transactions",
                shown.len(),
                aggregator.snapshot().len()
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.require(user_id, &id)?;
            print!(
                "{}",
                format_transaction_details(&txn, symbol, &settings.date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            amount,
            kind,
            category,
            description,
            date,
        } => {
            let txn = service.require(user_id, &id)?;

            let input = UpdateTransactionInput {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                kind: kind.as_deref().map(parse_kind).transpose()?,
                category,
                description,
                occurred_at: date.as_deref().map(parse_date).transpose()?,
            };
            if input.is_empty() {
                println!("Nothing to change. See 'fintrack transaction edit --help'.");
                return Ok(());
            }

            let updated = service.update(txn.id, input)?;

            println!("Updated transaction: {}", updated.id.short());
            print!(
                "{}",
                format_transaction_details(&updated, symbol, &settings.date_format)
            );
        }

        TransactionCommands::Delete { id, force } => {
            let txn = service.require(user_id, &id)?;

            if !force {
                println!("About to delete transaction:");
                print!(
                    "{}",
                    format_transaction_details(&txn, symbol, &settings.date_format)
                );
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = service.delete(txn.id)?;
            println!("Deleted transaction: {} ({})", deleted.id.short(), deleted);
        }

        TransactionCommands::Export { file, search, kind } => {
            let aggregator = filtered(storage, user_id, search, kind)?;
            let view = aggregator.current_filtered_view();

            let writer = File::create(&file).map_err(|e| {
                TrackerError::Export(format!("Cannot create {}: {}", file.display(), e))
            })?;
            export_transactions_csv(view, writer)?;

            println!("Exported {} transactions to {}", view.len(), file.display());
        }
    }

    Ok(())
}

/// Load the user's snapshot into an aggregator and apply the list filters
fn filtered(
    storage: &Storage,
    user_id: &str,
    search: Option<String>,
    kind: Option<String>,
) -> TrackerResult<TransactionAggregator> {
    let mut aggregator = TransactionAggregator::new();
    aggregator.refresh_from(storage, user_id)?;

    if let Some(query) = search {
        aggregator.set_search_query(query);
    }
    aggregator.set_selected_kind(kind.as_deref().map(parse_kind).transpose()?);

    Ok(aggregator)
}

pub(crate) fn parse_kind(s: &str) -> TrackerResult<TransactionKind> {
    s.parse().map_err(TrackerError::Validation)
}

fn parse_amount(s: &str) -> TrackerResult<Money> {
    Money::parse(s).map_err(|e| {
        TrackerError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '50.00' or '1,200'. Error: {}",
            s, e
        ))
    })
}

/// Parse a YYYY-MM-DD date as midnight UTC
fn parse_date(s: &str) -> TrackerResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        TrackerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| TrackerError::Validation(format!("Invalid date: '{}'", s)))?;
    Ok(Utc.from_utc_datetime(&midnight))
}
