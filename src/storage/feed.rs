//! Transaction feed
//!
//! The aggregator consumes whole snapshots. A feed is anything that can
//! produce the current snapshot for a user, newest first.

use crate::error::TrackerResult;
use crate::models::Transaction;

use super::{Storage, TransactionRepository};

/// Source of full transaction snapshots
pub trait TransactionFeed {
    /// All of `user_id`'s transactions ordered by `occurred_at` descending
    fn snapshot(&self, user_id: &str) -> TrackerResult<Vec<Transaction>>;
}

impl TransactionFeed for TransactionRepository {
    fn snapshot(&self, user_id: &str) -> TrackerResult<Vec<Transaction>> {
        self.get_by_user(user_id)
    }
}

impl TransactionFeed for Storage {
    fn snapshot(&self, user_id: &str) -> TrackerResult<Vec<Transaction>> {
        self.transactions.snapshot(user_id)
    }
}
