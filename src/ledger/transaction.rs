use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::errors::ValidationError;

/// Millisecond creation timestamp used as a transaction's identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TransactionId(pub i64);

impl TransactionId {
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse().map(TransactionId)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn value(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// A single recorded income or expense entry. Never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a transaction after validating the user-supplied fields.
    pub fn new(
        id: TransactionId,
        description: &str,
        amount: f64,
        category: Category,
        kind: TransactionKind,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let description = validate_description(description)?;
        let amount = validate_amount(amount)?;
        Ok(Self {
            id,
            description,
            amount,
            category,
            kind,
            created_at,
        })
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// Trims the description and rejects blank input.
pub fn validate_description(description: &str) -> Result<String, ValidationError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

/// Accepts only positive, finite amounts.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(ValidationError::InvalidAmount(amount.to_string()))
    }
}

/// Parses an amount the way a form field is read: trimmed decimal text, positive only.
pub fn parse_amount(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
    validate_amount(value).map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))
}
