//! Core data models for the tracker
//!
//! Everything the ledger engine stores or filters on: money amounts,
//! transaction ids, categories, and the transaction record itself.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::{Category, CategoryFilter, ParseCategoryError};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError};
pub use transaction::{ParseKindError, Transaction, TransactionKind, DATE_FORMAT};
