//! Interactive terminal session
//!
//! A line-based session that drives the ledger engine. The session owns the
//! presentation loop and nothing else: every command calls into the engine,
//! and after each successful mutation the session pulls fresh state with
//! `list` and `summarize` and re-renders. The engine never pushes updates.

use std::io::{BufRead, Write};

use crate::display::{format_register, format_summary, format_transaction_short};
use crate::error::TallyError;
use crate::ledger::{Ledger, TransactionInput};
use crate::models::{Category, CategoryFilter, TransactionKind};

const HELP: &str = "\
Commands:
  add <amount> <date> <category> <kind> <description>   Add a transaction
  edit <pos> <amount> <date> <category> <kind> <description>
                                                        Replace a transaction
  delete <pos>                                          Delete (asks first)
  list [category|All]                                   Show the register,
                                                        optionally set filter
  summary                                               Show totals
  help                                                  Show this help
  quit                                                  Exit

Dates are YYYY-MM-DD. Categories: Food, Transport, Rent, Salary, Other.
Kinds: Income, Expense. Amounts are stored positive for income and negative
for expenses, whatever sign you type.";

enum Control {
    Continue,
    Quit,
}

/// An interactive session over one in-memory ledger
///
/// Generic over reader and writer so tests can script it with buffers.
pub struct Session<R, W> {
    ledger: Ledger,
    filter: CategoryFilter,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session with an empty ledger
    pub fn new(input: R, output: W) -> Self {
        Self {
            ledger: Ledger::new(),
            filter: CategoryFilter::All,
            input,
            output,
        }
    }

    /// Run the command loop until quit or end of input
    pub fn run(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "tally - personal income and expense tracker")?;
        writeln!(self.output, "Type 'help' for commands.")?;

        loop {
            write!(self.output, "tally> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match self.handle_line(line.trim())? {
                Control::Quit => break,
                Control::Continue => {}
            }
        }
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> std::io::Result<Control> {
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "add" => self.cmd_add(rest)?,
            "edit" => self.cmd_edit(rest)?,
            "delete" => self.cmd_delete(rest)?,
            "list" => self.cmd_list(rest)?,
            "summary" => {
                let summary = self.ledger.summarize();
                writeln!(self.output, "{}", format_summary(&summary))?;
            }
            "help" => writeln!(self.output, "{}", HELP)?,
            "quit" | "exit" => return Ok(Control::Quit),
            other => writeln!(
                self.output,
                "Unknown command: {}. Type 'help' for commands.",
                other
            )?,
        }
        Ok(Control::Continue)
    }

    /// Parse the five entry fields from `add`/`edit` arguments
    ///
    /// The description is everything after the kind, so it may contain
    /// spaces. Empty trailing fields are passed through for the engine to
    /// reject, matching its validation order.
    fn parse_input(&mut self, args: &str) -> std::io::Result<Option<TransactionInput>> {
        let mut parts = args.splitn(5, char::is_whitespace);
        let amount = parts.next().unwrap_or("");
        let date = parts.next().unwrap_or("");
        let category_text = parts.next().unwrap_or("");
        let kind_text = parts.next().unwrap_or("");
        let description = parts.next().unwrap_or("").trim();

        if category_text.is_empty() || kind_text.is_empty() {
            writeln!(
                self.output,
                "{}",
                TallyError::Validation("all fields are required".into())
            )?;
            return Ok(None);
        }

        let category: Category = match category_text.parse() {
            Ok(category) => category,
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                return Ok(None);
            }
        };
        let kind: TransactionKind = match kind_text.parse() {
            Ok(kind) => kind,
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                return Ok(None);
            }
        };

        Ok(Some(TransactionInput::new(
            amount,
            date,
            category,
            kind,
            description,
        )))
    }

    fn cmd_add(&mut self, args: &str) -> std::io::Result<()> {
        let Some(input) = self.parse_input(args)? else {
            return Ok(());
        };
        match self.ledger.add(input) {
            Ok(txn) => {
                writeln!(self.output, "Added: {}", format_transaction_short(txn))?;
                self.render()?;
            }
            Err(err) => writeln!(self.output, "{}", err)?,
        }
        Ok(())
    }

    fn cmd_edit(&mut self, args: &str) -> std::io::Result<()> {
        let (position_text, rest) = match args.split_once(char::is_whitespace) {
            Some((position_text, rest)) => (position_text, rest.trim()),
            None => (args, ""),
        };
        let Ok(position) = position_text.parse::<usize>() else {
            writeln!(self.output, "Expected a position, got: {}", position_text)?;
            return Ok(());
        };
        let Some(input) = self.parse_input(rest)? else {
            return Ok(());
        };
        match self.ledger.update(position, input) {
            Ok(txn) => {
                writeln!(self.output, "Updated: {}", format_transaction_short(txn))?;
                self.render()?;
            }
            Err(err) => writeln!(self.output, "{}", err)?,
        }
        Ok(())
    }

    fn cmd_delete(&mut self, args: &str) -> std::io::Result<()> {
        let Ok(position) = args.parse::<usize>() else {
            writeln!(self.output, "Expected a position, got: {}", args)?;
            return Ok(());
        };

        // Confirm before the destructive call; the engine itself does not ask.
        let shown = match self.ledger.get(position) {
            Ok(txn) => format_transaction_short(txn),
            Err(err) => {
                writeln!(self.output, "{}", err)?;
                return Ok(());
            }
        };
        write!(self.output, "Delete {}? [y/N]: ", shown)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            writeln!(self.output, "Cancelled.")?;
            return Ok(());
        }

        match self.ledger.remove(position) {
            Ok(txn) => {
                writeln!(self.output, "Deleted: {}", format_transaction_short(&txn))?;
                self.render()?;
            }
            Err(err) => writeln!(self.output, "{}", err)?,
        }
        Ok(())
    }

    fn cmd_list(&mut self, args: &str) -> std::io::Result<()> {
        if !args.is_empty() {
            match args.parse::<CategoryFilter>() {
                Ok(filter) => self.filter = filter,
                Err(err) => {
                    writeln!(self.output, "{}", err)?;
                    return Ok(());
                }
            }
        }
        self.render()
    }

    /// Pull fresh state and re-render the filtered register plus summary
    fn render(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "Filter: {}", self.filter)?;
        let register = format_register(self.ledger.list_positions(self.filter));
        writeln!(self.output, "{}", register)?;
        let summary = self.ledger.summarize();
        writeln!(self.output, "{}", format_summary(&summary))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Run a scripted session and return everything it printed
    fn run_script(script: &str) -> String {
        let mut output = Vec::new();
        let mut session = Session::new(Cursor::new(script), &mut output);
        session.run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_add_and_summary() {
        let output = run_script(
            "add 100 2024-01-01 Salary Income paycheck\n\
             add 40 2024-01-02 Food Expense lunch\n\
             summary\n\
             quit\n",
        );
        assert!(output.contains("Added: 2024-01-01 $100.00 paycheck (Salary)"));
        assert!(output.contains("Added: 2024-01-02 -$40.00 lunch (Food)"));
        assert!(output
            .contains("Total Income: $100.00  |  Total Expenses: $40.00  |  Balance: $60.00"));
    }

    #[test]
    fn test_validation_errors_are_reported() {
        let output = run_script(
            "add abc 2024-01-01 Food Expense lunch\n\
             add 10 2024-13-40 Food Expense lunch\n\
             add 10 2024-01-01 Food Expense\n\
             quit\n",
        );
        assert_eq!(
            output.matches("Validation error: invalid amount or date").count(),
            2
        );
        assert!(output.contains("Validation error: all fields are required"));
    }

    #[test]
    fn test_unknown_category_and_kind() {
        let output = run_script(
            "add 10 2024-01-01 Groceries Expense lunch\n\
             add 10 2024-01-01 Food Transfer lunch\n\
             quit\n",
        );
        assert!(output.contains("Unknown category: Groceries"));
        assert!(output.contains("Unknown transaction kind: Transfer"));
    }

    #[test]
    fn test_list_filter_keeps_summary_unfiltered() {
        let output = run_script(
            "add 100 2024-01-01 Salary Income paycheck\n\
             add 40 2024-01-02 Food Expense lunch\n\
             list Food\n\
             quit\n",
        );
        // The filtered register hides the paycheck row but the summary
        // printed alongside it still covers the full ledger.
        assert!(output.contains("Filter: Food"));
        assert!(output
            .contains("Total Income: $100.00  |  Total Expenses: $40.00  |  Balance: $60.00"));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let output = run_script(
            "add 40 2024-01-02 Food Expense lunch\n\
             delete 0\n\
             n\n\
             summary\n\
             delete 0\n\
             y\n\
             summary\n\
             quit\n",
        );
        assert!(output.contains("Cancelled."));
        assert!(output.contains("Deleted: 2024-01-02 -$40.00 lunch (Food)"));
        assert!(output
            .contains("Total Income: $0.00  |  Total Expenses: $0.00  |  Balance: $0.00"));
    }

    #[test]
    fn test_edit_flips_sign_with_kind() {
        let output = run_script(
            "add 100 2024-01-01 Salary Income paycheck\n\
             edit 0 100 2024-01-01 Salary Expense clawback\n\
             quit\n",
        );
        assert!(output.contains("Updated: 2024-01-01 -$100.00 clawback (Salary)"));
    }

    #[test]
    fn test_delete_unknown_position() {
        let output = run_script("delete 3\nquit\n");
        assert!(output.contains("Transaction not found: position 3"));
    }

    #[test]
    fn test_unknown_command() {
        let output = run_script("frobnicate\nquit\n");
        assert!(output.contains("Unknown command: frobnicate"));
    }
}
