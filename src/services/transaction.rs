//! Transaction service
//!
//! Provides business logic for transaction management: validation against
//! the user's categories, partial updates and lookup by short ID.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Money, Transaction, TransactionId, TransactionKind};
use crate::storage::Storage;

use super::category::CategoryService;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub user_id: String,
    pub amount: Money,
    pub kind: TransactionKind,
    /// Category name or ID
    pub category: String,
    pub description: Option<String>,
    /// Defaults to now
    pub occurred_at: Option<DateTime<Utc>>,
}

/// Fields that may be changed on an existing transaction
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub amount: Option<Money>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.occurred_at.is_none()
    }
}

fn check_amount(amount: Money) -> TrackerResult<()> {
    if !amount.is_positive() {
        warn!(amount = %amount, "rejected non-positive amount");
        return Err(TrackerError::Validation(
            "Amount must be greater than 0".into(),
        ));
    }
    Ok(())
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> TrackerResult<Transaction> {
        check_amount(input.amount)?;
        let category = self.resolve_category(&input.user_id, &input.category, input.kind)?;

        let mut txn = Transaction::new(
            input.user_id,
            input.amount,
            input.kind,
            category.id,
            category.name,
        );
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(occurred_at) = input.occurred_at {
            txn.occurred_at = occurred_at;
        }

        txn.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(
            id = %txn.id,
            kind = %txn.kind,
            amount = %txn.amount,
            category = %txn.category_name,
            "created transaction"
        );
        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find one of a user's transactions by full ID or a unique prefix of it
    ///
    /// The prefix may be given with or without the `txn-` marker, so both
    /// `txn-1a2b3c4d` and `1a2b` are accepted.
    pub fn find(&self, user_id: &str, identifier: &str) -> TrackerResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return Ok(self
                .storage
                .transactions
                .get(id)?
                .filter(|t| t.user_id == user_id));
        }

        let needle = identifier.trim();
        let needle = needle.strip_prefix("txn-").unwrap_or(needle).to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let mut matches: Vec<Transaction> = self
            .storage
            .transactions
            .get_by_user(user_id)?
            .into_iter()
            .filter(|t| t.id.as_uuid().simple().to_string().starts_with(&needle))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(TrackerError::Validation(format!(
                "'{}' matches {} transactions, use a longer ID",
                identifier, n
            ))),
        }
    }

    /// Like [`find`](Self::find), but a missing transaction is an error
    pub fn require(&self, user_id: &str, identifier: &str) -> TrackerResult<Transaction> {
        self.find(user_id, identifier)?
            .ok_or_else(|| TrackerError::transaction_not_found(identifier))
    }

    /// List a user's transactions, newest first
    pub fn list(&self, user_id: &str) -> TrackerResult<Vec<Transaction>> {
        self.storage.transactions.get_by_user(user_id)
    }

    /// Update a transaction
    ///
    /// Changing the kind or the category re-resolves the category, and the
    /// copied category name follows it.
    pub fn update(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> TrackerResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

        if let Some(amount) = input.amount {
            check_amount(amount)?;
            txn.amount = amount;
        }

        let kind_changed = input.kind.is_some_and(|k| k != txn.kind);
        if let Some(kind) = input.kind {
            txn.kind = kind;
        }

        if input.category.is_some() || kind_changed {
            let identifier = match input.category {
                Some(category) => category,
                None => txn.category_id.to_string(),
            };
            let category = self.resolve_category(&txn.user_id, &identifier, txn.kind)?;
            txn.category_id = category.id;
            txn.category_name = category.name;
        }

        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        if let Some(occurred_at) = input.occurred_at {
            txn.occurred_at = occurred_at;
        }

        txn.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(id = %txn.id, "updated transaction");
        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> TrackerResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        info!(id = %id, "deleted transaction");
        Ok(txn)
    }

    fn resolve_category(
        &self,
        user_id: &str,
        identifier: &str,
        kind: TransactionKind,
    ) -> TrackerResult<Category> {
        if identifier.trim().is_empty() {
            warn!("rejected transaction without a category");
            return Err(TrackerError::Validation("Please select a category".into()));
        }

        let category = CategoryService::new(self.storage).require(user_id, identifier)?;
        if category.kind != kind {
            warn!(category = %category.name, kind = %kind, "rejected category of the wrong kind");
            return Err(TrackerError::Validation(format!(
                "Category '{}' is for {} transactions",
                category.name,
                category.kind.to_string().to_lowercase()
            )));
        }

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::services::category::CreateCategoryInput;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let categories = CategoryService::new(&storage);
        for (name, kind) in [
            ("Salary", TransactionKind::Income),
            ("Food", TransactionKind::Expense),
            ("Rent", TransactionKind::Expense),
        ] {
            categories
                .create(CreateCategoryInput {
                    user_id: "alice".into(),
                    name: name.into(),
                    kind,
                    icon: None,
                    color: None,
                })
                .unwrap();
        }

        (temp_dir, storage)
    }

    fn input(cents: i64, kind: TransactionKind, category: &str) -> CreateTransactionInput {
        CreateTransactionInput {
            user_id: "alice".into(),
            amount: Money::from_cents(cents),
            kind,
            category: category.into(),
            description: None,
            occurred_at: None,
        }
    }

    #[test]
    fn test_create_transaction_copies_category_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut create = input(4000, TransactionKind::Expense, "food");
        create.description = Some("  lunch ".into());
        let txn = service.create(create).unwrap();

        assert_eq!(txn.category_name, "Food");
        assert_eq!(txn.description, "lunch");
        assert_eq!(service.list("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_amount_must_be_positive() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        for cents in [0, -500] {
            let err = service
                .create(input(cents, TransactionKind::Expense, "Food"))
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Validation error: Amount must be greater than 0"
            );
        }
        assert!(service.list("alice").unwrap().is_empty());
    }

    #[test]
    fn test_category_required_and_must_match_kind() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .create(input(100, TransactionKind::Expense, " "))
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Please select a category");

        let err = service
            .create(input(100, TransactionKind::Expense, "Gifts"))
            .unwrap_err();
        assert!(err.is_not_found());

        let err = service
            .create(input(100, TransactionKind::Expense, "Salary"))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_occurred_at_is_kept() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        let mut create = input(100, TransactionKind::Income, "Salary");
        create.occurred_at = Some(when);
        let txn = service.create(create).unwrap();

        assert_eq!(txn.occurred_at, when);
        assert!(txn.recorded_at > when);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(input(100, TransactionKind::Expense, "Food"))
            .unwrap();

        assert_eq!(service.find("alice", &txn.id.short()).unwrap(), Some(txn.clone()));
        assert_eq!(service.find("alice", &txn.id.to_string()).unwrap(), Some(txn.clone()));
        assert_eq!(service.find("bob", &txn.id.short()).unwrap(), None);
        assert!(service.require("alice", "txn-").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_switches_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(input(100, TransactionKind::Expense, "Food"))
            .unwrap();

        let updated = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    amount: Some(Money::from_cents(250)),
                    category: Some("Rent".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount.cents(), 250);
        assert_eq!(updated.category_name, "Rent");

        // Kind change without a matching category is rejected
        let err = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionKind::Income),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        let moved = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    kind: Some(TransactionKind::Income),
                    category: Some("Salary".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(moved.is_income());
    }

    #[test]
    fn test_delete_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(input(100, TransactionKind::Expense, "Food"))
            .unwrap();

        service.delete(txn.id).unwrap();
        assert!(service.get(txn.id).unwrap().is_none());
        assert!(service.delete(txn.id).unwrap_err().is_not_found());
    }
}
