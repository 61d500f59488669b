//! Core data models for the finance tracker
//!
//! This module contains the data structures of the domain: transactions,
//! categories, money amounts and typed identifiers.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::{default_categories, Category, CategoryValidationError};
pub use ids::{CategoryId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
