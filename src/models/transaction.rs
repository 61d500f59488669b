//! Transaction model
//!
//! A transaction is either income or expense. The amount is stored as a
//! non-negative value; the kind alone decides how it contributes to totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// Whether a transaction brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    /// Sign prefix used when displaying an amount of this kind
    pub fn sign(&self) -> &'static str {
        match self {
            Self::Income => "+",
            Self::Expense => "-",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        })
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction kind '{}' (expected income or expense)",
                other
            )),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Owner of the transaction
    pub user_id: String,

    /// Amount, never signed by convention
    pub amount: Money,

    pub kind: TransactionKind,

    /// Category the transaction was filed under
    pub category_id: CategoryId,

    /// Category display name, copied at creation time
    #[serde(default)]
    pub category_name: String,

    #[serde(default)]
    pub description: String,

    /// When the transaction happened (chosen by the user)
    pub occurred_at: DateTime<Utc>,

    /// When the transaction was recorded
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction dated now
    pub fn new(
        user_id: impl Into<String>,
        amount: Money,
        kind: TransactionKind,
        category_id: CategoryId,
        category_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            user_id: user_id.into(),
            amount,
            kind,
            category_id,
            category_name: category_name.into(),
            description: String::new(),
            occurred_at: now,
            recorded_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn occurred_at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    /// Amount with the sign implied by the kind
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    /// Validate user-entered fields
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.occurred_at.format("%Y-%m-%d"),
            self.category_name,
            self.kind.sign(),
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Amount must be greater than 0 (got {0})")]
    NonPositiveAmount(Money),
}
