//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. Listings
//! come back newest first: by `occurred_at`, then by `recorded_at`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TrackerError;
use crate::models::{CategoryId, Transaction, TransactionId, TransactionKind};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Newest-first ordering used by every listing
pub fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.occurred_at
        .cmp(&a.occurred_at)
        .then(b.recorded_at.cmp(&a.recorded_at))
}

/// Repository for transaction persistence with a per-user index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: user_id -> transaction_ids
    by_user: RwLock<HashMap<String, Vec<TransactionId>>>,
}

fn lock_error(e: impl std::fmt::Display) -> TrackerError {
    TrackerError::Storage(format!("Failed to acquire lock: {}", e))
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and rebuild the index
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_user = self.by_user.write().map_err(lock_error)?;

        data.clear();
        by_user.clear();

        for txn in file_data.transactions {
            by_user.entry(txn.user_id.clone()).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        debug!(count = data.len(), path = %self.path.display(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all transactions belonging to a user
    pub fn get_by_user(&self, user_id: &str) -> Result<Vec<Transaction>, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_user = self.by_user.read().map_err(lock_error)?;

        let ids = by_user.get(user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Get a user's transactions of one kind
    pub fn get_by_user_and_kind(
        &self,
        user_id: &str,
        kind: TransactionKind,
    ) -> Result<Vec<Transaction>, TrackerError> {
        let mut transactions = self.get_by_user(user_id)?;
        transactions.retain(|t| t.kind == kind);
        Ok(transactions)
    }

    /// Get a user's transactions filed under a category
    pub fn get_by_user_and_category(
        &self,
        user_id: &str,
        category_id: CategoryId,
    ) -> Result<Vec<Transaction>, TrackerError> {
        let mut transactions = self.get_by_user(user_id)?;
        transactions.retain(|t| t.category_id == category_id);
        Ok(transactions)
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_user = self.by_user.write().map_err(lock_error)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_user.get_mut(&old.user_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_user.entry(txn.user_id.clone()).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, TrackerError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_user = self.by_user.write().map_err(lock_error)?;

        match data.remove(&id) {
            Some(txn) => {
                if let Some(ids) = by_user.get_mut(&txn.user_id) {
                    ids.retain(|&tid| tid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
