pub mod summary_service;

pub use summary_service::{CategoryStat, SummaryService, Totals};
