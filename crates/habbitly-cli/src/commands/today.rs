//! Today view: habits for the category in focus right now.

use chrono::Timelike;
use habbitly_core::schedule::{current_category, HabitCategory, DEFAULT_WINDOWS};
use habbitly_core::storage::HabitDb;

pub fn run(all: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;
    let now = chrono::Local::now();
    let today = now.date_naive();
    let habits = db.list_habits()?;
    let logs = db.logs_for_date(today)?;

    let categories: Vec<HabitCategory> = if all {
        HabitCategory::ALL.to_vec()
    } else {
        vec![current_category(now.hour(), &DEFAULT_WINDOWS)]
    };

    for category in categories {
        println!("{}", category.title());
        let mut any = false;
        for habit in habits.iter().filter(|h| h.category == category) {
            any = true;
            let mark = match logs.iter().find(|log| log.habit_id == habit.id) {
                Some(log) if log.completed => "x",
                Some(_) => "-",
                None => " ",
            };
            println!("  [{mark}] {}  ({})", habit.name, habit.id);
        }
        if !any {
            println!("  (no habits)");
        }
    }
    Ok(())
}
