//! Transaction display formatting
//!
//! Renders the (possibly filtered) register as a terminal table. The first
//! column shows the ledger position so edit/delete commands can address the
//! right record even when a category filter hides rows.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Transaction;

#[derive(Tabled)]
struct RegisterRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl RegisterRow {
    fn new(position: usize, txn: &Transaction) -> Self {
        Self {
            position,
            date: txn.date_string(),
            category: txn.category.to_string(),
            kind: txn.kind.to_string(),
            amount: txn.amount.to_string(),
            description: txn.description.clone(),
        }
    }
}

/// Format a register of transactions with their ledger positions
pub fn format_register<'a>(
    transactions: impl IntoIterator<Item = (usize, &'a Transaction)>,
) -> String {
    let rows: Vec<RegisterRow> = transactions
        .into_iter()
        .map(|(position, txn)| RegisterRow::new(position, txn))
        .collect();

    if rows.is_empty() {
        return "No transactions found.".to_string();
    }

    Table::new(rows).with(Style::psql()).to_string()
}

/// Format a single transaction for a confirmation prompt
pub fn format_transaction_short(txn: &Transaction) -> String {
    format!(
        "{} {} {} ({})",
        txn.date_string(),
        txn.amount,
        txn.description,
        txn.category
    )
}
