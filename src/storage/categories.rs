//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TrackerError;
use crate::models::{Category, CategoryId, TransactionKind};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

fn lock_error(e: impl std::fmt::Display) -> TrackerError {
    TrackerError::Storage(format!("Failed to acquire lock: {}", e))
}

fn sorted(mut list: Vec<Category>) -> Vec<Category> {
    list.sort_by(|a, b| {
        a.kind
            .is_income()
            .cmp(&b.kind.is_income())
            .reverse()
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    list
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self.categories.write().map_err(lock_error)?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        debug!(count = categories.len(), path = %self.path.display(), "loaded categories");
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let categories = self.categories.read().map_err(lock_error)?;
        let file_data = CategoryData {
            categories: sorted(categories.values().cloned().collect()),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, TrackerError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.get(&id).cloned())
    }

    /// Get a user's categories, income first, then by name
    pub fn get_by_user(&self, user_id: &str) -> Result<Vec<Category>, TrackerError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(sorted(
            categories
                .values()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    /// Get a user's categories of one kind
    pub fn get_by_user_and_kind(
        &self,
        user_id: &str,
        kind: TransactionKind,
    ) -> Result<Vec<Category>, TrackerError> {
        let mut list = self.get_by_user(user_id)?;
        list.retain(|c| c.kind == kind);
        Ok(list)
    }

    /// Get a user's category by name (case-insensitive)
    pub fn get_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>, TrackerError> {
        let categories = self.categories.read().map_err(lock_error)?;
        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .values()
            .find(|c| c.user_id == user_id && c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), TrackerError> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category, returning whether it existed
    pub fn delete(&self, id: CategoryId) -> Result<bool, TrackerError> {
        let mut categories = self.categories.write().map_err(lock_error)?;
        Ok(categories.remove(&id).is_some())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, TrackerError> {
        let categories = self.categories.read().map_err(lock_error)?;
        Ok(categories.len())
    }
}
