//! Terminal display formatting
//!
//! Pure rendering helpers; nothing here touches the ledger.

pub mod summary;
pub mod transaction;

pub use summary::format_summary;
pub use transaction::{format_register, format_transaction_short};
