//! finance-tracker - personal income and expense tracking
//!
//! This library provides the core functionality for the `fintrack` command
//! line tool. Users record income and expense transactions under categories;
//! the [`services::TransactionAggregator`] turns a user's transactions into a
//! summary (balance, totals, spending by category, recent activity) and a
//! searchable, kind-filtered list.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, transactions, categories)
//! - `storage`: JSON file storage layer and the transaction feed
//! - `reports`: Summary computation and list filtering
//! - `services`: Business logic layer and the aggregator
//! - `display`: Terminal formatting
//! - `export`: CSV export
//! - `cli`: Command handlers for the `fintrack` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::paths::TrackerPaths;
//! use finance_tracker::services::TransactionAggregator;
//! use finance_tracker::storage::Storage;
//!
//! let mut storage = Storage::new(TrackerPaths::new()?)?;
//! storage.load_all()?;
//!
//! let mut aggregator = TransactionAggregator::new();
//! aggregator.refresh_from(&storage, "local")?;
//! println!("Balance: {}", aggregator.current_summary().balance);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
