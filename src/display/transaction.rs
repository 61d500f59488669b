//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display,
//! including register views and the details card.

use crate::models::Transaction;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, currency_symbol: &str) -> String {
    let amount = format!(
        "{}{}",
        txn.kind.sign(),
        txn.amount.format_with_symbol(currency_symbol)
    );

    let description = if txn.description.is_empty() {
        String::new()
    } else {
        format!(" {}", txn.description)
    };

    format!(
        "{:12} {} {:>13} {}{}",
        txn.id.short(),
        txn.occurred_at.format("%Y-%m-%d"),
        amount,
        truncate(category_label(txn), 16),
        description
    )
    .trim_end()
    .to_string()
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:>13} {:16} {}\n",
        "ID", "Date", "Amount", "Category", "Description"
    ));
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency_symbol));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.occurred_at.format(date_format)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", category_label(txn)));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output.push_str(&format!(
        "Recorded:    {}\n",
        txn.recorded_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn category_label(txn: &Transaction) -> &str {
    if txn.category_name.is_empty() {
        "(uncategorized)"
    } else {
        &txn.category_name
    }
}

/// Pad or truncate to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
