//! Category model
//!
//! Categories belong to a single user and are either income or expense
//! categories. Transactions copy the category name when they are recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionKind;

/// Maximum category name length in characters
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A user-defined category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Owner of the category
    pub user_id: String,

    /// Category name
    pub name: String,

    /// Which kind of transaction this category is offered for
    pub kind: TransactionKind,

    /// Optional icon name
    #[serde(default)]
    pub icon: String,

    /// Optional display color (e.g. "#FF9800")
    #[serde(default)]
    pub color: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(user_id: impl Into<String>, name: impl Into<String>, kind: TransactionKind) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            user_id: user_id.into(),
            name: name.into(),
            kind,
            icon: String::new(),
            color: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the category
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        let len = self.name.chars().count();
        if len > MAX_CATEGORY_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Starter categories offered to a user with none of their own
pub fn default_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &["Salary", "Freelance", "Investments", "Gifts"],
        TransactionKind::Expense => &[
            "Food",
            "Transport",
            "Housing",
            "Utilities",
            "Entertainment",
            "Healthcare",
            "Shopping",
        ],
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name too long ({0} chars, max 50)")]
    NameTooLong(usize),
}
