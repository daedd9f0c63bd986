//! Transaction store, derived statistics and supporting utilities.

pub mod services;
pub mod store;
pub mod time;
pub mod utils;

pub use services::{CategoryStat, SummaryService, Totals};
pub use store::{Subscriber, TransactionStore};
pub use time::{Clock, FixedClock, SystemClock};
