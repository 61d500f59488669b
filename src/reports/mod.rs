//! Reports derived from a transaction snapshot
//!
//! - `summary`: income/expense totals, balance and expense breakdown
//! - `filter`: search and kind filtering of the transaction list

pub mod filter;
pub mod summary;

pub use filter::FilterState;
pub use summary::{Summary, RECENT_TRANSACTIONS_LIMIT};
