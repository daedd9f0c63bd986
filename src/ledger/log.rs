use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::transaction::{
    validate_amount, validate_description, Transaction, TransactionId, TransactionKind,
};
use crate::errors::ValidationError;

/// Which transactions a list view shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TransactionFilter {
    pub fn matches(self, transaction: &Transaction) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Income => transaction.kind == TransactionKind::Income,
            TransactionFilter::Expense => transaction.kind == TransactionKind::Expense,
        }
    }
}

impl fmt::Display for TransactionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionFilter::All => "All",
            TransactionFilter::Income => "Income",
            TransactionFilter::Expense => "Expenses",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionFilter {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TransactionFilter::All),
            "income" => Ok(TransactionFilter::Income),
            "expense" | "expenses" => Ok(TransactionFilter::Expense),
            other => Err(ValidationError::UnknownFilter(other.to_string())),
        }
    }
}

/// Ordered transaction history, newest first, with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log from stored entries, keeping the first occurrence of any repeated id.
    /// Entries with a blank description or a non-positive amount are dropped.
    pub fn from_entries(entries: Vec<Transaction>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let entries = entries
            .into_iter()
            .filter(|txn| {
                if let Err(err) = validate_description(&txn.description)
                    .and_then(|_| validate_amount(txn.amount))
                {
                    tracing::warn!(id = %txn.id, error = %err, "dropping invalid stored transaction");
                    return false;
                }
                let fresh = seen.insert(txn.id);
                if !fresh {
                    tracing::warn!(id = %txn.id, "dropping duplicate transaction id");
                }
                fresh
            })
            .collect();
        Self { entries }
    }

    pub fn prepend(&mut self, transaction: Transaction) {
        self.entries.insert(0, transaction);
    }

    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.entries.iter().position(|txn| txn.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.entries.iter().find(|txn| txn.id == id)
    }

    pub fn filtered(&self, filter: TransactionFilter) -> Vec<&Transaction> {
        self.entries.iter().filter(|txn| filter.matches(txn)).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_id(&self) -> Option<TransactionId> {
        self.entries.iter().map(|txn| txn.id).max()
    }
}

impl<'a> IntoIterator for &'a TransactionLog {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'de> Deserialize<'de> for TransactionLog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<Transaction>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries))
    }
}
