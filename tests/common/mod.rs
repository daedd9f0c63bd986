#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use money_tracker::{
    core::{Clock, TransactionStore},
    storage::{MemoryStorage, STORAGE_KEY},
};
use std::cell::Cell;

/// Clock that advances one second every time it is read.
pub struct SteppingClock {
    current: Cell<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            current: Cell::new(start),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.current.get();
        self.current.set(now + Duration::seconds(1));
        now
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap()
}

/// Store over a fresh in-memory backend; the returned handle observes its writes.
pub fn memory_store() -> (TransactionStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = TransactionStore::open_with(
        Box::new(storage.clone()),
        STORAGE_KEY,
        Box::new(SteppingClock::starting_at(start_time())),
    );
    (store, storage)
}
