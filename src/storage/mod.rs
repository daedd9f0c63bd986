pub mod json_backend;
pub mod memory;

use crate::{errors::Result, ledger::TransactionLog};

/// Fixed key under which the transaction log is persisted.
pub const STORAGE_KEY: &str = "money_tracker_expenses";

/// Durable string key-value storage the transaction log is written to.
pub trait StorageBackend {
    /// Returns the stored value for `key`, or `None` when nothing has been written yet.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Loads the log stored under `key`. Missing, unreadable or malformed data yields an
/// empty log so startup never fails.
pub fn load_log(backend: &dyn StorageBackend, key: &str) -> TransactionLog {
    let raw = match backend.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no stored transactions, starting empty");
            return TransactionLog::new();
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored transactions");
            return TransactionLog::new();
        }
    };
    match serde_json::from_str::<TransactionLog>(&raw) {
        Ok(log) => {
            tracing::debug!(key, count = log.len(), "loaded stored transactions");
            log
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "stored transactions are malformed, starting empty");
            TransactionLog::new()
        }
    }
}

/// Serializes the full log and writes it under `key`.
pub fn save_log(backend: &dyn StorageBackend, key: &str, log: &TransactionLog) -> Result<()> {
    let json = serde_json::to_string(log)?;
    backend.set(key, &json)
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Category, Transaction, TransactionId, TransactionKind};
    use chrono::{TimeZone, Utc};

    fn sample_log() -> TransactionLog {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        TransactionLog::from_entries(vec![
            Transaction::new(
                TransactionId(2),
                "Cinema",
                14.0,
                Category::Entertainment,
                TransactionKind::Expense,
                at,
            )
            .unwrap(),
            Transaction::new(
                TransactionId(1),
                "Salary",
                1000.0,
                Category::Other,
                TransactionKind::Income,
                at,
            )
            .unwrap(),
        ])
    }

    #[test]
    fn save_then_load_restores_log() {
        let storage = MemoryStorage::new();
        let log = sample_log();
        save_log(&storage, STORAGE_KEY, &log).unwrap();
        assert_eq!(load_log(&storage, STORAGE_KEY), log);
    }

    #[test]
    fn empty_log_round_trips() {
        let storage = MemoryStorage::new();
        save_log(&storage, STORAGE_KEY, &TransactionLog::new()).unwrap();
        assert_eq!(storage.raw(STORAGE_KEY).as_deref(), Some("[]"));
        assert!(load_log(&storage, STORAGE_KEY).is_empty());
    }

    #[test]
    fn malformed_value_degrades_to_empty_log() {
        let storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "{not json").unwrap();
        assert!(load_log(&storage, STORAGE_KEY).is_empty());

        storage.set(STORAGE_KEY, r#"{"id": 1}"#).unwrap();
        assert!(load_log(&storage, STORAGE_KEY).is_empty());
    }

    #[test]
    fn missing_key_yields_empty_log() {
        let storage = MemoryStorage::new();
        assert!(load_log(&storage, STORAGE_KEY).is_empty());
    }

    #[test]
    fn reads_records_written_by_the_browser_widget() {
        let storage = MemoryStorage::new();
        storage
            .set(
                STORAGE_KEY,
                r#"[{"id":1714554000000,"description":"Groceries","amount":42.1,
                    "category":"food","type":"expense","date":"2024-05-01T09:00:00.000Z"}]"#,
            )
            .unwrap();
        let log = load_log(&storage, STORAGE_KEY);
        assert_eq!(log.len(), 1);
        let txn = log.get(TransactionId(1714554000000)).unwrap();
        assert_eq!(txn.category, Category::Food);
        assert_eq!(txn.amount, 42.1);
    }
}
