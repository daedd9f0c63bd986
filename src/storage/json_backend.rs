use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    errors::Result,
};

use super::StorageBackend;

const VALUE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const DEFAULT_RETENTION: usize = 3;

/// File-backed key-value storage: each key maps to `<root>/store/<key>.json`.
///
/// Before a key is overwritten the previous file is copied into
/// `<root>/backups/<key>/`, keeping at most `retention` snapshots. A retention of
/// zero disables snapshots.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    store_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        let store_dir = PathResolver::store_dir_in(&root);
        let backups_dir = PathResolver::backup_dir_in(&root);
        ensure_dir(&store_dir)?;
        Ok(Self {
            store_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION),
        })
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.store_dir
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backups_dir.join(canonical_key(key))
    }

    /// Snapshot file names for `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| {
            parse_backup_timestamp(b)
                .cmp(&parse_backup_timestamp(a))
                .then_with(|| b.cmp(a))
        });
        Ok(entries)
    }

    pub fn backup_path(&self, key: &str, backup_name: &str) -> PathBuf {
        self.backup_dir(key).join(backup_name)
    }

    fn backup_existing_file(&self, key: &str, path: &Path) -> Result<()> {
        if self.retention == 0 || !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(key);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup_name = format!("{}_{}.{}", canonical_key(key), timestamp, VALUE_EXTENSION);
        fs::copy(path, dir.join(backup_name))?;
        self.prune_backups(key)
    }

    fn prune_backups(&self, key: &str) -> Result<()> {
        let backups = self.list_backups(key)?;
        for name in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(self.backup_path(key, name)) {
                tracing::warn!(backup = %name, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key);
        self.backup_existing_file(key, &path)?;
        write_atomic(&path, value)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "value".into()
    } else {
        sanitized
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", VALUE_EXTENSION))?;
    let mut parts = stem.rsplitn(3, '_');
    let time_part = parts.next()?;
    let date_part = parts.next()?;
    if !is_digits(date_part, 8) || !is_digits(time_part, 6) {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{date_part}{time_part}"), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{load_log, STORAGE_KEY};
    use tempfile::TempDir;

    fn storage_with_temp_dir(retention: usize) -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(retention))
            .expect("json storage");
        (storage, temp)
    }

    #[test]
    fn get_missing_key_returns_none() {
        let (storage, _guard) = storage_with_temp_dir(1);
        assert!(storage.get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn set_then_get_returns_value() {
        let (storage, _guard) = storage_with_temp_dir(1);
        storage.set(STORAGE_KEY, "[]").unwrap();
        assert_eq!(storage.get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
        assert!(storage
            .value_path(STORAGE_KEY)
            .ends_with("store/money_tracker_expenses.json"));
    }

    #[test]
    fn overwrite_keeps_previous_value_as_backup() {
        let (storage, _guard) = storage_with_temp_dir(2);
        storage.set(STORAGE_KEY, "[]").unwrap();
        storage.set(STORAGE_KEY, "[ ]").unwrap();
        let backups = storage.list_backups(STORAGE_KEY).unwrap();
        assert_eq!(backups.len(), 1);
        let saved = fs::read_to_string(storage.backup_path(STORAGE_KEY, &backups[0])).unwrap();
        assert_eq!(saved, "[]");
    }

    #[test]
    fn zero_retention_disables_backups() {
        let (storage, _guard) = storage_with_temp_dir(0);
        storage.set(STORAGE_KEY, "[]").unwrap();
        storage.set(STORAGE_KEY, "[]").unwrap();
        assert!(storage.list_backups(STORAGE_KEY).unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty_log() {
        let (storage, _guard) = storage_with_temp_dir(0);
        fs::write(storage.value_path(STORAGE_KEY), "garbage").unwrap();
        assert!(load_log(&storage, STORAGE_KEY).is_empty());
    }

    #[test]
    fn parses_backup_timestamps() {
        let parsed = parse_backup_timestamp("money_tracker_expenses_20240102_030405.json");
        assert_eq!(
            parsed.map(|ts| ts.to_rfc3339()),
            Some("2024-01-02T03:04:05+00:00".to_string())
        );
        assert!(parse_backup_timestamp("notes.json").is_none());
    }
}
