//! Motivation tip command for CLI.
//!
//! Any failure past habit lookup degrades to the canned fallback tip;
//! a flaky external service should never break the tracker.

use habbitly_core::motivation::{request_for_habit, MotivationClient, FALLBACK_TIP};
use habbitly_core::storage::HabitDb;
use habbitly_core::Config;

pub fn run(habit_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;
    let habit = db
        .get_habit(habit_id)?
        .ok_or(format!("Habit not found: {habit_id}"))?;
    let logs = db.logs_for_habit(habit_id)?;
    let today = chrono::Local::now().date_naive();
    let request = request_for_habit(&habit, &logs, today);

    let config = Config::load_or_default();
    let tip = match MotivationClient::from_config(&config.motivation) {
        Ok(client) => {
            let runtime = tokio::runtime::Runtime::new()?;
            match runtime.block_on(client.generate(&request)) {
                Ok(response) => response.motivation_tip,
                Err(_) => FALLBACK_TIP.to_string(),
            }
        }
        Err(_) => FALLBACK_TIP.to_string(),
    };

    println!("{tip}");
    Ok(())
}
