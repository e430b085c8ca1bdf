//! Daily habit logging commands for CLI.

use clap::Subcommand;
use habbitly_core::storage::HabitDb;
use habbitly_core::HabitLog;

use super::parse_date_or_today;

#[derive(Subcommand)]
pub enum LogAction {
    /// Record a habit outcome for one day (overwrites any earlier entry)
    Record {
        /// Habit ID
        habit_id: String,
        /// Day to record, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Mark the habit as missed instead of completed
        #[arg(long)]
        missed: bool,
        /// Journal note for a completed day
        #[arg(long)]
        journal: Option<String>,
        /// Reason for a missed day
        #[arg(long)]
        reason: Option<String>,
    },
    /// List logs
    List {
        /// Filter by habit ID
        #[arg(long)]
        habit: Option<String>,
        /// Filter by day, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;

    match action {
        LogAction::Record {
            habit_id,
            date,
            missed,
            journal,
            reason,
        } => {
            db.get_habit(&habit_id)?
                .ok_or(format!("Habit not found: {habit_id}"))?;
            let date = parse_date_or_today(date.as_deref())?;
            let log = HabitLog::new(&habit_id, date, !missed, journal, reason);
            let stored = db.upsert_log(&log)?;
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }
        LogAction::List { habit, date } => {
            let logs = match (habit, date) {
                (Some(habit_id), None) => db.logs_for_habit(&habit_id)?,
                (None, Some(day)) => db.logs_for_date(parse_date_or_today(Some(&day))?)?,
                (Some(habit_id), Some(day)) => {
                    let date = parse_date_or_today(Some(&day))?;
                    db.get_log(&habit_id, date)?.into_iter().collect()
                }
                (None, None) => db.list_logs()?,
            };
            println!("{}", serde_json::to_string_pretty(&logs)?);
        }
    }
    Ok(())
}
