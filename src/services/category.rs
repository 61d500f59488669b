//! Category service
//!
//! Business logic for category management: validation, per-user name
//! uniqueness and the starter set of default categories.

use tracing::{info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{default_categories, Category, CategoryId, TransactionKind};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct CreateCategoryInput {
    pub user_id: String,
    pub name: String,
    pub kind: TransactionKind,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Fields that may be changed on an existing category
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub kind: Option<TransactionKind>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, input: CreateCategoryInput) -> TrackerResult<Category> {
        let name = input.name.trim();
        self.ensure_name_available(&input.user_id, name, None)?;

        let mut category = Category::new(input.user_id, name, input.kind);
        category.icon = input.icon.unwrap_or_default();
        category.color = input.color.unwrap_or_default();

        category
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        info!(id = %category.id, name = %category.name, kind = %category.kind, "created category");
        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> TrackerResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find one of a user's categories by name or ID string
    pub fn find(&self, user_id: &str, identifier: &str) -> TrackerResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(user_id, identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return Ok(self
                .storage
                .categories
                .get(id)?
                .filter(|c| c.user_id == user_id));
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a missing category is an error
    pub fn require(&self, user_id: &str, identifier: &str) -> TrackerResult<Category> {
        self.find(user_id, identifier)?
            .ok_or_else(|| TrackerError::category_not_found(identifier))
    }

    /// List a user's categories
    pub fn list(&self, user_id: &str) -> TrackerResult<Vec<Category>> {
        self.storage.categories.get_by_user(user_id)
    }

    /// List a user's categories of one kind
    pub fn list_by_kind(&self, user_id: &str, kind: TransactionKind) -> TrackerResult<Vec<Category>> {
        self.storage.categories.get_by_user_and_kind(user_id, kind)
    }

    /// Update a category
    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> TrackerResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))?;

        if let Some(name) = input.name {
            let name = name.trim();
            self.ensure_name_available(&category.user_id, name, Some(id))?;
            category.rename(name);
        }
        if let Some(kind) = input.kind {
            category.kind = kind;
        }
        if let Some(icon) = input.icon {
            category.icon = icon;
        }
        if let Some(color) = input.color {
            category.color = color;
        }

        category
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        info!(id = %category.id, name = %category.name, "updated category");
        Ok(category)
    }

    /// Delete a category
    ///
    /// Transactions filed under it keep their copied category name.
    pub fn delete(&self, id: CategoryId) -> TrackerResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| TrackerError::category_not_found(id.to_string()))?;

        let still_used = self
            .storage
            .transactions
            .get_by_user_and_category(&category.user_id, id)?
            .len();
        if still_used > 0 {
            warn!(
                id = %id,
                transactions = still_used,
                "deleting category that transactions still reference"
            );
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        info!(id = %id, name = %category.name, "deleted category");
        Ok(category)
    }

    /// Create the default income and expense categories for a user
    ///
    /// Names the user already has are skipped. Returns the categories created.
    pub fn create_defaults(&self, user_id: &str) -> TrackerResult<Vec<Category>> {
        let mut created = Vec::new();

        for &kind in TransactionKind::all() {
            for &name in default_categories(kind) {
                if self.storage.categories.get_by_name(user_id, name)?.is_some() {
                    continue;
                }
                let category = Category::new(user_id, name, kind);
                self.storage.categories.upsert(category.clone())?;
                created.push(category);
            }
        }

        if !created.is_empty() {
            self.storage.categories.save()?;
        }

        info!(user_id, count = created.len(), "created default categories");
        Ok(created)
    }

    fn ensure_name_available(
        &self,
        user_id: &str,
        name: &str,
        exclude: Option<CategoryId>,
    ) -> TrackerResult<()> {
        if name.is_empty() {
            return Err(TrackerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        match self.storage.categories.get_by_name(user_id, name)? {
            Some(existing) if Some(existing.id) != exclude => Err(TrackerError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn input(name: &str, kind: TransactionKind) -> CreateCategoryInput {
        CreateCategoryInput {
            user_id: "alice".into(),
            name: name.into(),
            kind,
            icon: None,
            color: None,
        }
    }

    #[test]
    fn test_create_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let category = service.create(input("  Food ", TransactionKind::Expense)).unwrap();
        assert_eq!(category.name, "Food");
        assert_eq!(service.list("alice").unwrap().len(), 1);
        assert!(service.list("bob").unwrap().is_empty());
    }

    #[test]
    fn test_blank_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        let err = service.create(input("   ", TransactionKind::Expense)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Category name cannot be empty");
    }

    #[test]
    fn test_duplicate_name_rejected_per_user() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        service.create(input("Food", TransactionKind::Expense)).unwrap();
        let err = service.create(input("food", TransactionKind::Expense)).unwrap_err();
        assert!(matches!(err, TrackerError::Duplicate { .. }));

        let mut other_user = input("Food", TransactionKind::Expense);
        other_user.user_id = "bob".into();
        assert!(service.create(other_user).is_ok());
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let salary = service.create(input("Salary", TransactionKind::Income)).unwrap();

        assert_eq!(service.find("alice", "SALARY").unwrap(), Some(salary.clone()));
        assert_eq!(
            service.find("alice", &salary.id.to_string()).unwrap(),
            Some(salary.clone())
        );
        assert_eq!(service.find("bob", &salary.id.to_string()).unwrap(), None);
        assert!(service.require("alice", "Rent").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.create(input("Food", TransactionKind::Expense)).unwrap();
        service.create(input("Rent", TransactionKind::Expense)).unwrap();

        let updated = service
            .update(
                food.id,
                UpdateCategoryInput {
                    name: Some("Groceries".into()),
                    color: Some("#4CAF50".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Groceries");
        assert_eq!(updated.color, "#4CAF50");

        // Renaming to its own name is fine, to another category's is not
        assert!(service
            .update(
                food.id,
                UpdateCategoryInput {
                    name: Some("groceries".into()),
                    ..Default::default()
                }
            )
            .is_ok());
        assert!(service
            .update(
                food.id,
                UpdateCategoryInput {
                    name: Some("Rent".into()),
                    ..Default::default()
                }
            )
            .is_err());
    }

    #[test]
    fn test_delete_category() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let food = service.create(input("Food", TransactionKind::Expense)).unwrap();

        service.delete(food.id).unwrap();
        assert!(service.get(food.id).unwrap().is_none());
        assert!(service.delete(food.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_create_defaults_skips_existing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        service.create(input("Food", TransactionKind::Expense)).unwrap();

        let created = service.create_defaults("alice").unwrap();
        let expected = default_categories(TransactionKind::Income).len()
            + default_categories(TransactionKind::Expense).len()
            - 1;
        assert_eq!(created.len(), expected);
        assert!(service.create_defaults("alice").unwrap().is_empty());

        let income = service.list_by_kind("alice", TransactionKind::Income).unwrap();
        assert!(income.iter().any(|c| c.name == "Salary"));
    }
}
