//! Balance summary
//!
//! Totals, the expense breakdown by category name and the most recent
//! transactions of a snapshot. Totals always cover the whole snapshot,
//! regardless of any filter the caller is viewing it through.

use std::collections::BTreeMap;
use std::io::Write;

use crate::display::transaction::format_transaction_row;
use crate::error::TrackerResult;
use crate::models::{Money, Transaction, TransactionKind};

/// Number of transactions kept in `recent_transactions`
pub const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// Derived totals for one snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_income: Money,
    pub total_expense: Money,
    /// `total_income - total_expense`
    pub balance: Money,
    /// Expense totals keyed by category *name*. Distinct categories that
    /// share a name land in the same bucket.
    pub category_breakdown: BTreeMap<String, Money>,
    /// First entries of the snapshot in its given order
    pub recent_transactions: Vec<Transaction>,
    pub transaction_count: usize,
}

impl Summary {
    /// Compute the summary of a snapshot in a single pass
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut total_income = Money::zero();
        let mut total_expense = Money::zero();
        let mut category_breakdown: BTreeMap<String, Money> = BTreeMap::new();

        for txn in transactions {
            match txn.kind {
                TransactionKind::Income => total_income += txn.amount,
                TransactionKind::Expense => {
                    total_expense += txn.amount;
                    *category_breakdown
                        .entry(txn.category_name.clone())
                        .or_default() += txn.amount;
                }
            }
        }

        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            category_breakdown,
            recent_transactions: transactions
                .iter()
                .take(RECENT_TRANSACTIONS_LIMIT)
                .cloned()
                .collect(),
            transaction_count: transactions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Breakdown entries, largest expense first (ties by name)
    pub fn top_categories(&self) -> Vec<(&str, Money)> {
        let mut entries: Vec<_> = self
            .category_breakdown
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Share of total expense for an amount, in percent
    pub fn expense_share(&self, amount: Money) -> f64 {
        if self.total_expense.is_zero() {
            0.0
        } else {
            amount.cents() as f64 / self.total_expense.cents() as f64 * 100.0
        }
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Balance:        {}\n",
            self.balance.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "Total Income:   {}\n",
            self.total_income.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!(
            "Total Expense:  {}\n",
            self.total_expense.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("Transactions:   {}\n", self.transaction_count));

        if !self.category_breakdown.is_empty() {
            output.push_str("\nExpenses by Category\n");
            output.push_str(&"-".repeat(50));
            output.push('\n');
            for (name, amount) in self.top_categories() {
                let label = if name.is_empty() { "(uncategorized)" } else { name };
                output.push_str(&format!(
                    "  {:<28} {:>12} {:>6.1}%\n",
                    label,
                    amount.format_with_symbol(currency_symbol),
                    self.expense_share(amount)
                ));
            }
        }

        output.push_str("\nRecent Transactions\n");
        output.push_str(&"-".repeat(50));
        output.push('\n');
        if self.recent_transactions.is_empty() {
            output.push_str("  No transactions yet.\n");
        } else {
            for txn in &self.recent_transactions {
                output.push_str("  ");
                output.push_str(&format_transaction_row(txn, currency_symbol));
                output.push('\n');
            }
        }

        output
    }

    /// Export the category breakdown as CSV
    pub fn export_breakdown_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["Category", "Amount", "Percentage"])?;

        for (name, amount) in self.top_categories() {
            csv_writer.write_record([
                name.to_string(),
                amount.format_with_symbol(""),
                format!("{:.2}", self.expense_share(amount)),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
