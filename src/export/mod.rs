//! Export module for the finance tracker
//!
//! CSV export of transaction lists. The summary's category breakdown has its
//! own exporter on [`Summary`](crate::reports::Summary).

pub mod csv;

pub use self::csv::{export_transactions_csv, TRANSACTION_CSV_HEADER};
