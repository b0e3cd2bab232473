//! tally - personal income and expense tracker
//!
//! The core of this crate is the transaction ledger engine: an in-memory,
//! single-threaded collection of signed monetary events with operations to
//! create, edit, delete, filter, and total them. The terminal session in
//! [`cli`] is a thin collaborator that calls the engine and re-renders its
//! results after every mutation.
//!
//! # Architecture
//!
//! - `models`: money, ids, categories, and the transaction record
//! - `ledger`: the engine itself (validation, sign normalization, totals)
//! - `error`: the two-variant error taxonomy
//! - `display`: terminal rendering helpers
//! - `cli`: the interactive session
//!
//! # Example
//!
//! ```rust
//! use tally::ledger::{Ledger, TransactionInput};
//! use tally::models::{Category, CategoryFilter, TransactionKind};
//!
//! let mut ledger = Ledger::new();
//! ledger.add(TransactionInput::new(
//!     "100",
//!     "2024-01-01",
//!     Category::Salary,
//!     TransactionKind::Income,
//!     "paycheck",
//! ))?;
//!
//! let summary = ledger.summarize();
//! assert_eq!(summary.total_income.cents(), 10_000);
//! assert_eq!(ledger.list(CategoryFilter::All).count(), 1);
//! # Ok::<(), tally::TallyError>(())
//! ```

pub mod cli;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;

pub use error::{TallyError, TallyResult};
pub use ledger::{Ledger, Summary, TransactionInput};
