mod config;
pub mod finance_db;
pub mod habit_db;
pub mod planner_db;

pub use config::{AuthConfig, Config, MotivationConfig};
pub use finance_db::FinanceDb;
pub use habit_db::HabitDb;
pub use planner_db::PlannerDb;

use std::path::PathBuf;

/// File name of the shared SQLite database inside [`data_dir`].
pub const DB_FILE: &str = "habbitly.db";

/// Returns `~/.config/habbitly[-dev]/` based on HABBITLY_ENV.
///
/// Set HABBITLY_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("HABBITLY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("habbitly-dev")
    } else {
        base_dir.join("habbitly")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
