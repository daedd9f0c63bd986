#![doc(test(attr(deny(warnings))))]

//! Money Tracker records income and expense transactions, keeps running totals and a
//! per-category spending breakdown, and persists the log to local key-value storage.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod dashboard;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{CategoryStat, SummaryService, Totals, TransactionStore};
pub use dashboard::{Dashboard, DashboardView};
pub use errors::{TrackerError, ValidationError};
pub use ledger::{Category, Transaction, TransactionFilter, TransactionId, TransactionKind};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Money Tracker tracing initialized.");
    });
}
