//! Search and kind filtering over a transaction snapshot

use crate::models::{Transaction, TransactionKind};

/// Filter state for one viewing session
///
/// An empty (or whitespace-only) query and no selected kind match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text query matched against description and category name
    pub search_query: String,
    /// Only keep transactions of this kind
    pub selected_kind: Option<TransactionKind>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search query
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Restrict to a kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.selected_kind = Some(kind);
        self
    }

    /// True when no predicate is active
    pub fn is_empty(&self) -> bool {
        self.selected_kind.is_none() && !self.has_search()
    }

    fn has_search(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    pub fn matches_kind(&self, txn: &Transaction) -> bool {
        self.selected_kind.map_or(true, |kind| txn.kind == kind)
    }

    /// Case-insensitive substring match on description or category name
    pub fn matches_search(&self, txn: &Transaction) -> bool {
        if !self.has_search() {
            return true;
        }
        let query = self.search_query.to_lowercase();
        txn.description.to_lowercase().contains(&query)
            || txn.category_name.to_lowercase().contains(&query)
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_kind(txn) && self.matches_search(txn)
    }

    /// Apply the kind predicate, then the search predicate, keeping order
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches_kind(t))
            .filter(|t| self.matches_search(t))
            .cloned()
            .collect()
    }

    /// Kind selection after clicking `clicked` while `current` is selected.
    ///
    /// Clicking the selected kind again clears the selection. This belongs to
    /// the caller; the aggregator only ever receives the resulting value.
    pub fn toggled_kind(
        current: Option<TransactionKind>,
        clicked: TransactionKind,
    ) -> Option<TransactionKind> {
        if current == Some(clicked) {
            None
        } else {
            Some(clicked)
        }
    }
}
