//! Service layer for the finance tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and cross-entity operations. The aggregator turns a
//! transaction snapshot into the summary and filtered views.

pub mod aggregator;
pub mod category;
pub mod transaction;

pub use aggregator::TransactionAggregator;
pub use category::{CategoryService, CreateCategoryInput, UpdateCategoryInput};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
