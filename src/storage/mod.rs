//! Storage layer for the finance tracker
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. The storage also serves as the transaction feed for the
//! aggregator.

pub mod categories;
pub mod feed;
pub mod file_io;
pub mod init;
pub mod transactions;

pub use categories::CategoryRepository;
pub use feed::TransactionFeed;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use transactions::TransactionRepository;

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: TrackerPaths,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: TrackerPaths) -> Result<Self, TrackerError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), TrackerError> {
        self.transactions.load()?;
        self.categories.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), TrackerError> {
        self.transactions.save()?;
        self.categories.save()?;
        Ok(())
    }
}
