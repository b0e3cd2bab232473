//! Summary display formatting

use crate::ledger::Summary;

/// Format the three summary figures on one line
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Total Income: {}  |  Total Expenses: {}  |  Balance: {}",
        summary.total_income, summary.total_expenses, summary.balance
    )
}
