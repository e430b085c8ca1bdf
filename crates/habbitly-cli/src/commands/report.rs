//! Habit completion report command for CLI.

use habbitly_core::export::render_habit_report;
use habbitly_core::range::RangeKind;
use habbitly_core::report::build_reports;
use habbitly_core::storage::HabitDb;

pub fn run(range: &str, habit_id: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let kind = RangeKind::parse(range).ok_or_else(|| format!("unknown range: {range}"))?;
    let db = HabitDb::open()?;
    let today = chrono::Local::now().date_naive();

    let habits = match habit_id {
        Some(id) => vec![db.get_habit(id)?.ok_or(format!("Habit not found: {id}"))?],
        None => db.list_habits()?,
    };
    let logs = db.list_logs()?;

    for report in build_reports(&habits, &logs, kind, today) {
        print!("{}", render_habit_report(&report));
    }
    Ok(())
}
