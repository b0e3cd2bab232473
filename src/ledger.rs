//! The transaction ledger engine
//!
//! Owns the ordered collection of transactions and provides every operation
//! the presentation layer needs: add, update, remove, filtered listing, and
//! summary totals. All operations are synchronous and leave the ledger
//! consistent on failure; a failed call never performs a partial write.
//!
//! Raw user input crosses the boundary as [`TransactionInput`], with the
//! amount and date still in text form. The engine validates, parses, and
//! sign-normalizes before anything is stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};
use crate::models::{
    Category, CategoryFilter, Money, Transaction, TransactionId, TransactionKind, DATE_FORMAT,
};

/// Raw field values for creating or replacing a transaction
///
/// Mirrors the entry form: amount and date arrive as the user typed them,
/// category and kind come from closed pick lists.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Amount text, e.g. "100" or "40.50"; sign is ignored
    pub amount: String,
    /// Date text in `YYYY-MM-DD` form
    pub date: String,
    /// Category
    pub category: Category,
    /// Income or expense; decides the stored sign
    pub kind: TransactionKind,
    /// Description, required non-empty
    pub description: String,
}

impl TransactionInput {
    /// Create an input from raw field values
    pub fn new(
        amount: impl Into<String>,
        date: impl Into<String>,
        category: Category,
        kind: TransactionKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            date: date.into(),
            category,
            kind,
            description: description.into(),
        }
    }

    /// Validate and parse the raw fields
    ///
    /// Checked in order: every text field must be non-empty, then the amount
    /// and date must parse. Returns the sign-normalized amount, the date, and
    /// the trimmed description.
    fn validate(&self) -> TallyResult<(Money, NaiveDate, String)> {
        let amount_text = self.amount.trim();
        let date_text = self.date.trim();
        let description = self.description.trim();

        if amount_text.is_empty() || date_text.is_empty() || description.is_empty() {
            return Err(TallyError::Validation("all fields are required".into()));
        }

        let amount = Money::parse(amount_text);
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT);
        let (amount, date) = match (amount, date) {
            (Ok(amount), Ok(date)) => (amount, date),
            _ => return Err(TallyError::Validation("invalid amount or date".into())),
        };

        Ok((self.kind.signed(amount), date, description.to_string()))
    }
}

/// Derived totals over the full, unfiltered ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of all strictly positive amounts
    pub total_income: Money,
    /// Absolute value of the sum of all strictly negative amounts
    pub total_expenses: Money,
    /// `total_income - total_expenses`
    pub balance: Money,
}

/// The ordered, in-memory collection of all transactions
///
/// Insertion order is preserved and is also display order; positions address
/// records directly. The ledger is a plain value with no coupling to any
/// rendering code; callers pull fresh state with [`Ledger::list`] and
/// [`Ledger::summarize`] after each mutation.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger holds no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The transaction at `position`
    pub fn get(&self, position: usize) -> TallyResult<&Transaction> {
        self.transactions
            .get(position)
            .ok_or_else(|| TallyError::transaction_not_found(format!("position {}", position)))
    }

    /// Resolve a stable id back to the current position
    pub fn position_of(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    /// Validate the input and append a new transaction
    ///
    /// The stored amount is `+|amount|` for income and `-|amount|` for
    /// expenses, whatever sign the caller typed. Returns the created record.
    pub fn add(&mut self, input: TransactionInput) -> TallyResult<&Transaction> {
        let (amount, date, description) = input.validate()?;
        self.transactions.push(Transaction::new(
            date,
            input.category,
            input.kind,
            amount,
            description,
        ));
        Ok(self.transactions.last().expect("just pushed"))
    }

    /// Replace all user fields of the transaction at `position`
    ///
    /// Validation happens before any mutation, so a bad input leaves the
    /// record untouched. The id and creation time survive the edit;
    /// collection order is unchanged.
    pub fn update(&mut self, position: usize, input: TransactionInput) -> TallyResult<&Transaction> {
        if position >= self.transactions.len() {
            return Err(TallyError::transaction_not_found(format!(
                "position {}",
                position
            )));
        }
        let (amount, date, description) = input.validate()?;

        let txn = &mut self.transactions[position];
        txn.amount = amount;
        txn.date = date;
        txn.category = input.category;
        txn.kind = input.kind;
        txn.description = description;
        txn.updated_at = chrono::Utc::now();

        Ok(&self.transactions[position])
    }

    /// Remove the transaction at `position`, returning it
    ///
    /// Subsequent positions shift down by one. Asking the user before calling
    /// this is the presentation layer's job.
    pub fn remove(&mut self, position: usize) -> TallyResult<Transaction> {
        if position >= self.transactions.len() {
            return Err(TallyError::transaction_not_found(format!(
                "position {}",
                position
            )));
        }
        Ok(self.transactions.remove(position))
    }

    /// Iterate over all transactions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Lazily iterate over transactions passing the filter, in insertion order
    ///
    /// A pure projection: repeated calls with the same filter and unchanged
    /// ledger yield identical sequences.
    pub fn list(&self, filter: CategoryFilter) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |t| filter.matches(t.category))
    }

    /// Like [`Ledger::list`], but paired with each record's ledger position
    ///
    /// A filtered view's row numbers do not line up with ledger positions;
    /// this keeps the two associated so edits and deletes address the right
    /// record.
    pub fn list_positions(
        &self,
        filter: CategoryFilter,
    ) -> impl Iterator<Item = (usize, &Transaction)> {
        self.transactions
            .iter()
            .enumerate()
            .filter(move |(_, t)| filter.matches(t.category))
    }

    /// Compute totals over the entire unfiltered ledger
    ///
    /// Never affected by any display filter. Income counts amounts strictly
    /// greater than zero, expenses strictly less; a zero amount occupies a
    /// slot but moves neither total.
    pub fn summarize(&self) -> Summary {
        let total_income: Money = self
            .transactions
            .iter()
            .map(|t| t.amount)
            .filter(Money::is_positive)
            .sum();
        let total_expenses: Money = self
            .transactions
            .iter()
            .map(|t| t.amount)
            .filter(Money::is_negative)
            .sum::<Money>()
            .abs();

        Summary {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income(amount: &str, date: &str, description: &str) -> TransactionInput {
        TransactionInput::new(
            amount,
            date,
            Category::Salary,
            TransactionKind::Income,
            description,
        )
    }

    fn expense(amount: &str, date: &str, category: Category, description: &str) -> TransactionInput {
        TransactionInput::new(amount, date, category, TransactionKind::Expense, description)
    }

    #[test]
    fn test_add_normalizes_sign() {
        let mut ledger = Ledger::new();

        let txn = ledger
            .add(income("100", "2024-01-01", "paycheck"))
            .unwrap();
        assert_eq!(txn.amount.cents(), 10000);

        // A typed minus sign on an income is ignored
        let txn = ledger
            .add(income("-250", "2024-01-02", "bonus"))
            .unwrap();
        assert_eq!(txn.amount.cents(), 25000);

        // And a positive amount on an expense flips negative
        let txn = ledger
            .add(expense("40", "2024-01-02", Category::Food, "lunch"))
            .unwrap();
        assert_eq!(txn.amount.cents(), -4000);
    }

    #[test]
    fn test_add_rejects_missing_fields() {
        let mut ledger = Ledger::new();

        let err = ledger
            .add(income("100", "2024-01-01", ""))
            .unwrap_err();
        assert!(err.is_validation());

        let err = ledger.add(income("", "2024-01-01", "x")).unwrap_err();
        assert!(err.is_validation());

        let err = ledger.add(income("100", "  ", "x")).unwrap_err();
        assert!(err.is_validation());

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_rejects_unparseable_amount_and_date() {
        let mut ledger = Ledger::new();

        let err = ledger.add(income("abc", "2024-01-01", "x")).unwrap_err();
        assert!(err.is_validation());

        let err = ledger.add(income("100", "2024-13-40", "x")).unwrap_err();
        assert!(err.is_validation());

        let err = ledger.add(income("100", "01/02/2024", "x")).unwrap_err();
        assert!(err.is_validation());

        assert!(ledger.is_empty());
    }

    #[test]
    fn test_add_rejects_amount_too_large_for_cents() {
        let mut ledger = Ledger::new();

        // All digits, so it passes the presence check; it must come back as
        // a validation error rather than overflowing cents arithmetic.
        let err = ledger
            .add(income("99999999999999999", "2024-01-01", "jackpot"))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_summarize_scenario() {
        let mut ledger = Ledger::new();
        ledger
            .add(income("100", "2024-01-01", "paycheck"))
            .unwrap();
        ledger
            .add(expense("40", "2024-01-02", Category::Food, "lunch"))
            .unwrap();

        let summary = ledger.summarize();
        assert_eq!(summary.total_income, Money::from_cents(10000));
        assert_eq!(summary.total_expenses, Money::from_cents(4000));
        assert_eq!(summary.balance, Money::from_cents(6000));
    }

    #[test]
    fn test_summarize_empty_ledger() {
        let summary = Ledger::new().summarize();
        assert_eq!(summary, Summary::default());
        assert!(summary.balance.is_zero());
    }

    #[test]
    fn test_summarize_ignores_filter() {
        let mut ledger = Ledger::new();
        ledger.add(income("100", "2024-01-01", "pay")).unwrap();
        ledger
            .add(expense("40", "2024-01-02", Category::Food, "lunch"))
            .unwrap();
        ledger
            .add(expense("10", "2024-01-03", Category::Transport, "bus"))
            .unwrap();

        // The summary is a function of the full ledger only; listing with
        // any filter must not change it.
        let before = ledger.summarize();
        let _: Vec<_> = ledger.list(CategoryFilter::Only(Category::Food)).collect();
        assert_eq!(ledger.summarize(), before);
        assert_eq!(
            before.balance,
            before.total_income - before.total_expenses
        );
    }

    #[test]
    fn test_zero_amount_moves_no_total() {
        let mut ledger = Ledger::new();
        ledger.add(income("0", "2024-01-01", "nothing")).unwrap();

        assert_eq!(ledger.len(), 1);
        let summary = ledger.summarize();
        assert!(summary.total_income.is_zero());
        assert!(summary.total_expenses.is_zero());
        assert!(summary.balance.is_zero());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.add(income("1", "2024-01-03", "c")).unwrap();
        ledger.add(income("2", "2024-01-01", "a")).unwrap();
        ledger.add(income("3", "2024-01-02", "b")).unwrap();

        let descriptions: Vec<_> = ledger
            .list(CategoryFilter::All)
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(descriptions, ["c", "a", "b"]);
    }

    #[test]
    fn test_list_filters_exact_subsequence() {
        let mut ledger = Ledger::new();
        ledger
            .add(expense("1", "2024-01-01", Category::Food, "apples"))
            .unwrap();
        ledger.add(income("2", "2024-01-02", "pay")).unwrap();
        ledger
            .add(expense("3", "2024-01-03", Category::Food, "bread"))
            .unwrap();

        let food: Vec<_> = ledger
            .list(CategoryFilter::Only(Category::Food))
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(food, ["apples", "bread"]);

        // Restartable: a second pass yields the same sequence
        let again: Vec<_> = ledger
            .list(CategoryFilter::Only(Category::Food))
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(food, again);

        let empty: Vec<_> = ledger
            .list(CategoryFilter::Only(Category::Rent))
            .collect();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_list_positions_maps_filtered_rows_to_ledger() {
        let mut ledger = Ledger::new();
        ledger
            .add(expense("1", "2024-01-01", Category::Food, "apples"))
            .unwrap();
        ledger.add(income("2", "2024-01-02", "pay")).unwrap();
        ledger
            .add(expense("3", "2024-01-03", Category::Food, "bread"))
            .unwrap();

        let positions: Vec<_> = ledger
            .list_positions(CategoryFilter::Only(Category::Food))
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(positions, [0, 2]);
    }

    #[test]
    fn test_update_replaces_fields_in_place() {
        let mut ledger = Ledger::new();
        ledger.add(income("100", "2024-01-01", "pay")).unwrap();
        ledger
            .add(expense("40", "2024-01-02", Category::Food, "lunch"))
            .unwrap();

        let original_id = ledger.get(0).unwrap().id;

        let updated = ledger
            .update(
                0,
                TransactionInput::new(
                    "100",
                    "2024-01-01",
                    Category::Other,
                    TransactionKind::Expense,
                    "refund reversed",
                ),
            )
            .unwrap();

        // Flipping the kind flips the stored sign at the same magnitude
        assert_eq!(updated.amount.cents(), -10000);
        assert_eq!(updated.category, Category::Other);
        assert_eq!(updated.id, original_id);

        // Only the edited record changed
        assert_eq!(ledger.get(1).unwrap().description, "lunch");

        let summary = ledger.summarize();
        assert_eq!(summary.total_income, Money::zero());
        assert_eq!(summary.total_expenses, Money::from_cents(14000));
        assert_eq!(summary.balance, Money::from_cents(-14000));
    }

    #[test]
    fn test_update_invalid_input_leaves_record_untouched() {
        let mut ledger = Ledger::new();
        ledger.add(income("100", "2024-01-01", "pay")).unwrap();

        let err = ledger
            .update(
                0,
                TransactionInput::new(
                    "abc",
                    "2024-01-01",
                    Category::Salary,
                    TransactionKind::Income,
                    "pay",
                ),
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ledger.get(0).unwrap().amount.cents(), 10000);
    }

    #[test]
    fn test_update_unknown_position() {
        let mut ledger = Ledger::new();
        let err = ledger
            .update(5, income("1", "2024-01-01", "x"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_shifts_positions() {
        let mut ledger = Ledger::new();
        ledger.add(income("1", "2024-01-01", "a")).unwrap();
        ledger.add(income("2", "2024-01-02", "b")).unwrap();
        ledger.add(income("3", "2024-01-03", "c")).unwrap();

        let removed = ledger.remove(1).unwrap();
        assert_eq!(removed.description, "b");
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap().description, "a");
        assert_eq!(ledger.get(1).unwrap().description, "c");
    }

    #[test]
    fn test_remove_unknown_position() {
        let mut ledger = Ledger::new();
        ledger.add(income("1", "2024-01-01", "a")).unwrap();
        ledger.remove(0).unwrap();

        let err = ledger.remove(0).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_position_of_survives_removal() {
        let mut ledger = Ledger::new();
        ledger.add(income("1", "2024-01-01", "a")).unwrap();
        ledger.add(income("2", "2024-01-02", "b")).unwrap();
        let id_b = ledger.get(1).unwrap().id;

        ledger.remove(0).unwrap();
        assert_eq!(ledger.position_of(id_b), Some(0));
    }

    #[test]
    fn test_balance_invariant_over_operation_sequence() {
        let mut ledger = Ledger::new();
        ledger.add(income("500", "2024-02-01", "salary")).unwrap();
        ledger
            .add(expense("120.75", "2024-02-03", Category::Rent, "utilities"))
            .unwrap();
        ledger
            .add(expense("30", "2024-02-04", Category::Transport, "train"))
            .unwrap();
        ledger.remove(2).unwrap();
        ledger
            .update(1, expense("99.99", "2024-02-03", Category::Rent, "utilities"))
            .unwrap();

        let summary = ledger.summarize();
        assert_eq!(
            summary.balance,
            summary.total_income - summary.total_expenses
        );
        assert_eq!(summary.total_income, Money::from_cents(50000));
        assert_eq!(summary.total_expenses, Money::from_cents(9999));
    }
}
