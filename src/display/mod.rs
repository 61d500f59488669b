//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.

pub mod category;
pub mod transaction;

pub use category::{format_category_details, format_category_list, format_category_tree};
pub use transaction::{
    format_transaction_details, format_transaction_register, format_transaction_row,
};
