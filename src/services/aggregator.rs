//! Transaction aggregator
//!
//! Holds the latest snapshot of a user's transactions together with the
//! session's filter state, and keeps the summary and the filtered view in
//! step with both. Every mutation recomputes eagerly, so reads are plain
//! borrows and always reflect the last completed call.
//!
//! The aggregator is single-threaded and owns no resources. Callers that
//! receive snapshots asynchronously must serialize calls to [`ingest`].
//!
//! [`ingest`]: TransactionAggregator::ingest

use tracing::debug;

use crate::error::TrackerResult;
use crate::models::{Transaction, TransactionKind};
use crate::reports::{FilterState, Summary};
use crate::storage::TransactionFeed;

#[derive(Debug, Clone, Default)]
pub struct TransactionAggregator {
    snapshot: Vec<Transaction>,
    filter: FilterState,
    summary: Summary,
    filtered: Vec<Transaction>,
}

impl TransactionAggregator {
    /// Create an aggregator with an empty snapshot and no filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator that starts with the given filter
    pub fn with_filter(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Replace the snapshot. The order of `transactions` is kept as given.
    pub fn ingest(&mut self, transactions: Vec<Transaction>) {
        self.snapshot = transactions;
        self.summary = Summary::from_transactions(&self.snapshot);
        self.refilter();
        debug!(
            count = self.snapshot.len(),
            visible = self.filtered.len(),
            "ingested transaction snapshot"
        );
    }

    /// Pull a fresh snapshot for `user_id` from a feed and ingest it
    pub fn refresh_from<F>(&mut self, feed: &F, user_id: &str) -> TrackerResult<()>
    where
        F: TransactionFeed + ?Sized,
    {
        let snapshot = feed.snapshot(user_id)?;
        self.ingest(snapshot);
        Ok(())
    }

    /// Update the search query. Totals are unaffected.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
        self.refilter();
    }

    /// Update the kind filter. Totals are unaffected.
    pub fn set_selected_kind(&mut self, kind: Option<TransactionKind>) {
        self.filter.selected_kind = kind;
        self.refilter();
    }

    pub fn current_summary(&self) -> &Summary {
        &self.summary
    }

    pub fn current_filtered_view(&self) -> &[Transaction] {
        &self.filtered
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn snapshot(&self) -> &[Transaction] {
        &self.snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    fn refilter(&mut self) {
        self.filtered = self.filter.apply(&self.snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::models::{CategoryId, Money};

    fn txn(kind: TransactionKind, cents: i64, category: &str, description: &str) -> Transaction {
        Transaction::new("u", Money::from_cents(cents), kind, CategoryId::new(), category)
            .with_description(description)
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            txn(TransactionKind::Income, 10000, "Salary", ""),
            txn(TransactionKind::Expense, 4000, "Food", "lunch"),
            txn(TransactionKind::Expense, 1000, "Food", "snack"),
        ]
    }

    fn descriptions(view: &[Transaction]) -> Vec<&str> {
        view.iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn test_fresh_aggregator_is_empty() {
        let aggregator = TransactionAggregator::new();
        assert!(aggregator.is_empty());
        assert!(aggregator.current_filtered_view().is_empty());
        assert_eq!(aggregator.current_summary(), &Summary::default());
    }

    #[test]
    fn test_ingest_computes_summary() {
        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(scenario());

        let summary = aggregator.current_summary();
        assert_eq!(summary.total_income.cents(), 10000);
        assert_eq!(summary.total_expense.cents(), 5000);
        assert_eq!(summary.balance.cents(), 5000);
        assert_eq!(summary.category_breakdown["Food"].cents(), 5000);
        assert_eq!(aggregator.current_filtered_view().len(), 3);
    }

    #[test]
    fn test_ingest_empty_snapshot() {
        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(scenario());
        aggregator.ingest(Vec::new());

        let summary = aggregator.current_summary();
        assert!(summary.total_income.is_zero());
        assert!(summary.total_expense.is_zero());
        assert!(summary.balance.is_zero());
        assert!(summary.recent_transactions.is_empty());
        assert!(summary.category_breakdown.is_empty());
        assert!(aggregator.current_filtered_view().is_empty());
    }

    #[test]
    fn test_ingest_is_idempotent() {
        let snapshot = scenario();
        let mut once = TransactionAggregator::new();
        once.set_search_query("food");
        once.ingest(snapshot.clone());

        let mut twice = TransactionAggregator::new();
        twice.set_search_query("food");
        twice.ingest(snapshot.clone());
        twice.ingest(snapshot);

        assert_eq!(once.current_summary(), twice.current_summary());
        assert_eq!(once.current_filtered_view(), twice.current_filtered_view());
    }

    #[test]
    fn test_ingest_replaces_rather_than_merges() {
        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(scenario());
        aggregator.ingest(vec![txn(TransactionKind::Expense, 700, "Transport", "bus")]);

        assert_eq!(aggregator.snapshot().len(), 1);
        assert_eq!(aggregator.current_summary().total_income.cents(), 0);
        assert_eq!(aggregator.current_summary().total_expense.cents(), 700);
    }

    #[test]
    fn test_search_lunch() {
        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(scenario());
        aggregator.set_search_query("lunch");

        assert_eq!(descriptions(aggregator.current_filtered_view()), vec!["lunch"]);
    }

    #[test]
    fn test_filters_do_not_touch_totals() {
        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(scenario());
        let before = aggregator.current_summary().clone();

        aggregator.set_search_query("snack");
        aggregator.set_selected_kind(Some(TransactionKind::Income));

        assert_eq!(aggregator.current_summary(), &before);
        assert!(aggregator.current_filtered_view().is_empty());
    }

    #[test]
    fn test_kind_then_search_compose() {
        let mut snapshot = scenario();
        snapshot.push(txn(TransactionKind::Income, 500, "Food refund", "returned"));
        snapshot.push(txn(TransactionKind::Expense, 800, "Dining", "FOOD court"));

        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(snapshot.clone());
        aggregator.set_selected_kind(Some(TransactionKind::Expense));
        aggregator.set_search_query("food");

        let expected: Vec<_> = snapshot
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense)
            .filter(|t| {
                t.description.to_lowercase().contains("food")
                    || t.category_name.to_lowercase().contains("food")
            })
            .cloned()
            .collect();

        assert_eq!(aggregator.current_filtered_view(), expected.as_slice());
        assert_eq!(
            descriptions(aggregator.current_filtered_view()),
            vec!["lunch", "snack", "FOOD court"]
        );
    }

    #[test]
    fn test_selecting_same_kind_twice_keeps_it_selected() {
        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(scenario());
        aggregator.set_selected_kind(Some(TransactionKind::Income));
        aggregator.set_selected_kind(Some(TransactionKind::Income));

        let view = aggregator.current_filtered_view();
        assert_eq!(view.len(), 1);
        assert!(view.iter().all(|t| t.kind == TransactionKind::Income));
    }

    #[test]
    fn test_clearing_filters_restores_full_view() {
        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(scenario());
        aggregator.set_selected_kind(Some(TransactionKind::Expense));
        aggregator.set_search_query("lunch");
        aggregator.set_selected_kind(None);
        aggregator.set_search_query("");

        assert_eq!(aggregator.current_filtered_view(), aggregator.snapshot());
    }

    #[test]
    fn test_filter_survives_new_snapshot() {
        let mut aggregator =
            TransactionAggregator::with_filter(FilterState::new().kind(TransactionKind::Income));
        aggregator.ingest(scenario());
        assert_eq!(aggregator.current_filtered_view().len(), 1);

        let mut next = scenario();
        next.push(txn(TransactionKind::Income, 2500, "Freelance", "invoice"));
        aggregator.ingest(next);
        assert_eq!(aggregator.current_filtered_view().len(), 2);
    }

    #[test]
    fn test_filtered_view_is_ordered_subsequence() {
        let snapshot: Vec<_> = (0..12)
            .map(|i| {
                let kind = if i % 2 == 0 {
                    TransactionKind::Expense
                } else {
                    TransactionKind::Income
                };
                txn(kind, 100 + i, "Misc", &format!("entry {}", i % 3))
            })
            .collect();

        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(snapshot.clone());
        aggregator.set_selected_kind(Some(TransactionKind::Expense));
        aggregator.set_search_query("entry 1");

        let mut remaining = snapshot.iter();
        for item in aggregator.current_filtered_view() {
            assert!(remaining.any(|s| s == item), "view is not a subsequence");
        }
    }

    struct FixedFeed(Vec<Transaction>);

    impl TransactionFeed for FixedFeed {
        fn snapshot(&self, user_id: &str) -> TrackerResult<Vec<Transaction>> {
            Ok(self
                .0
                .iter()
                .filter(|t| t.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    struct FailingFeed;

    impl TransactionFeed for FailingFeed {
        fn snapshot(&self, _user_id: &str) -> TrackerResult<Vec<Transaction>> {
            Err(TrackerError::Storage("offline".into()))
        }
    }

    #[test]
    fn test_refresh_from_feed() {
        let feed = FixedFeed(scenario());
        let mut aggregator = TransactionAggregator::new();

        aggregator.refresh_from(&feed, "u").unwrap();
        assert_eq!(aggregator.snapshot().len(), 3);

        aggregator.refresh_from(&feed, "someone-else").unwrap();
        assert!(aggregator.is_empty());
    }

    #[test]
    fn test_failed_refresh_keeps_previous_snapshot() {
        let mut aggregator = TransactionAggregator::new();
        aggregator.ingest(scenario());

        assert!(aggregator.refresh_from(&FailingFeed, "u").is_err());
        assert_eq!(aggregator.snapshot().len(), 3);
    }
}
