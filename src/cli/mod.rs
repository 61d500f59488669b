//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod summary;
pub mod transaction;

pub use category::{handle_category_command, CategoryCommands};
pub use summary::handle_summary_command;
pub use transaction::{handle_transaction_command, TransactionCommands};
