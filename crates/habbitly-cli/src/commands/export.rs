//! CSV export commands for CLI.

use clap::Subcommand;
use habbitly_core::export::{habit_logs_csv, transactions_csv};
use habbitly_core::storage::{FinanceDb, HabitDb};

#[derive(Subcommand)]
pub enum ExportAction {
    /// Export all habit logs as CSV to stdout
    Habits,
    /// Export all transactions as CSV to stdout
    Finance,
}

pub fn run(action: ExportAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ExportAction::Habits => {
            let db = HabitDb::open()?;
            print!("{}", habit_logs_csv(&db.list_habits()?, &db.list_logs()?)?);
        }
        ExportAction::Finance => {
            let db = FinanceDb::open()?;
            print!("{}", transactions_csv(&db.list_transactions()?)?);
        }
    }
    Ok(())
}
