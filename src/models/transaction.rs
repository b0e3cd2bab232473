//! Transaction model
//!
//! A transaction is a single signed monetary event: an amount, a calendar
//! date, a category, an income/expense kind, and a description. The sign of
//! the stored amount always agrees with the kind; the constructor enforces
//! that and the ledger never stores a record any other way.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::TransactionId;
use super::money::Money;

/// Canonical date format for entry and display (ISO calendar date)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TransactionKind {
    #[default]
    Income,
    Expense,
}

impl TransactionKind {
    /// Apply this kind's sign to an amount
    ///
    /// Income is stored positive, expenses negative, regardless of the sign
    /// the caller supplied. This is the sole source of truth for how a
    /// transaction later counts toward the summary totals.
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount.abs(),
            Self::Expense => -amount.abs(),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => f.write_str("Income"),
            Self::Expense => f.write_str("Expense"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("income") => Ok(Self::Income),
            s if s.eq_ignore_ascii_case("expense") => Ok(Self::Expense),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Error for unrecognized kind names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown transaction kind: {}", self.0)
    }
}

impl std::error::Error for ParseKindError {}

/// A single income or expense event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, stable across edits
    pub id: TransactionId,

    /// Signed amount; positive for income, negative for expenses
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// Category
    pub category: Category,

    /// Income or expense
    pub kind: TransactionKind,

    /// Free-form description
    pub description: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction, normalizing the amount's sign to the kind
    pub fn new(
        date: NaiveDate,
        category: Category,
        kind: TransactionKind,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            amount: kind.signed(amount),
            date,
            category,
            kind,
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this transaction is income (non-negative amount)
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Whether this transaction is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// The date in canonical `YYYY-MM-DD` form
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// The amount's magnitude, as pre-filled into an edit form
    ///
    /// Editing always shows the amount positive; the user flips the kind to
    /// change the sign rather than typing a negative number.
    pub fn unsigned_amount(&self) -> Money {
        self.amount.abs()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date_string(),
            self.category,
            self.amount,
            self.description
        )
    }
}
