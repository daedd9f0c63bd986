use crate::{
    core::time::{Clock, SystemClock},
    errors::ValidationError,
    ledger::{
        Category, Transaction, TransactionFilter, TransactionId, TransactionKind, TransactionLog,
    },
    storage::{self, StorageBackend, STORAGE_KEY},
};

/// Observer invoked with the full log after every successful mutation.
pub type Subscriber = Box<dyn FnMut(&TransactionLog)>;

/// Owns the transaction log and writes it back to storage after each change.
pub struct TransactionStore {
    log: TransactionLog,
    storage: Box<dyn StorageBackend>,
    storage_key: String,
    clock: Box<dyn Clock>,
    last_id: Option<TransactionId>,
    subscribers: Vec<Subscriber>,
}

impl TransactionStore {
    /// Opens the store, loading whatever log `storage` holds under the default key.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        Self::open_with(storage, STORAGE_KEY, Box::new(SystemClock))
    }

    pub fn open_with(
        storage: Box<dyn StorageBackend>,
        storage_key: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let storage_key = storage_key.into();
        let log = storage::load_log(storage.as_ref(), &storage_key);
        let last_id = log.max_id();
        tracing::debug!(count = log.len(), key = %storage_key, "transaction store opened");
        Self {
            log,
            storage,
            storage_key,
            clock,
            last_id,
            subscribers: Vec::new(),
        }
    }

    /// Validates and records a new transaction at the front of the log.
    pub fn add(
        &mut self,
        description: &str,
        amount: f64,
        category: Category,
        kind: TransactionKind,
    ) -> Result<Transaction, ValidationError> {
        let created_at = self.clock.now();
        let id = self.peek_id(created_at.timestamp_millis());
        let transaction = Transaction::new(id, description, amount, category, kind, created_at)
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected transaction");
                err
            })?;

        self.last_id = Some(id);
        self.log.prepend(transaction.clone());
        tracing::debug!(id = %id, kind = %kind, amount, "transaction added");
        self.commit();
        Ok(transaction)
    }

    /// Removes the transaction with `id`. An unknown id changes nothing and writes nothing.
    pub fn remove(&mut self, id: TransactionId) -> Option<Transaction> {
        let removed = self.log.remove(id)?;
        tracing::debug!(id = %id, "transaction removed");
        self.commit();
        Some(removed)
    }

    pub fn list(&self, filter: TransactionFilter) -> Vec<&Transaction> {
        self.log.filtered(filter)
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.log.get(id)
    }

    pub fn transactions(&self) -> &TransactionLog {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&TransactionLog) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Next id: the creation millisecond, bumped past the last issued or loaded id.
    /// Once the ids run out at `i64::MAX` the nearest unused id to `millis` is taken.
    fn peek_id(&self, millis: i64) -> TransactionId {
        let candidate = match self.last_id {
            Some(last) if millis <= last.as_i64() => last.as_i64().checked_add(1),
            _ => Some(millis),
        };
        match candidate.map(TransactionId) {
            Some(id) if self.log.get(id).is_none() => id,
            _ => self.unused_id_near(millis),
        }
    }

    fn unused_id_near(&self, start: i64) -> TransactionId {
        let id = (start..=i64::MAX)
            .chain((i64::MIN..start).rev())
            .map(TransactionId)
            .find(|id| self.log.get(*id).is_none())
            .unwrap_or(TransactionId(start));
        tracing::warn!(id = %id, "transaction id space exhausted, using nearest free id");
        id
    }

    fn commit(&mut self) {
        // A failed write leaves the in-memory log authoritative; the next successful
        // save rewrites the whole log.
        if let Err(err) = storage::save_log(self.storage.as_ref(), &self.storage_key, &self.log) {
            tracing::error!(error = %err, key = %self.storage_key, "failed to persist transactions");
        }
        for subscriber in &mut self.subscribers {
            subscriber(&self.log);
        }
    }
}
