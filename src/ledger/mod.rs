//! Transaction domain models and the ordered transaction log.

pub mod category;
pub mod log;
pub mod transaction;

pub use category::{Category, CategoryColor};
pub use log::{TransactionFilter, TransactionLog};
pub use transaction::{
    parse_amount, validate_amount, validate_description, Transaction, TransactionId,
    TransactionKind,
};
