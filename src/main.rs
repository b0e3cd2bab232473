use anyhow::Result;
use clap::Parser;

use tally::cli::Session;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Terminal-based personal income and expense tracker",
    long_about = "tally keeps a single-session ledger of income and expense \
                  transactions. Add, edit, delete, and filter transactions \
                  interactively; totals update after every change. The ledger \
                  lives in memory only and is gone when the session ends."
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock());
    session.run()?;
    Ok(())
}
