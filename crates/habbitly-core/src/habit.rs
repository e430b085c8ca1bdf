//! Habit and habit-log domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::schedule::HabitCategory;

/// A tracked habit, owned by the single demo user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub category: HabitCategory,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a habit with a fresh id.
    ///
    /// # Errors
    /// Returns an error if `name` is blank.
    pub fn new(name: &str, category: HabitCategory) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category,
            created_at: Utc::now(),
        })
    }
}

/// One day's outcome for a habit.
///
/// At most one log exists per (habit, date); recording again for the
/// same day overwrites the earlier entry. A completed log carries an
/// optional journal note, a missed one an optional reason -- never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitLog {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub journal: Option<String>,
    pub reason_for_miss: Option<String>,
}

impl HabitLog {
    /// Build a log entry, keeping only the detail field that matches
    /// the outcome.
    pub fn new(
        habit_id: &str,
        date: NaiveDate,
        completed: bool,
        journal: Option<String>,
        reason_for_miss: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            habit_id: habit_id.to_string(),
            date,
            completed,
            journal: if completed { journal } else { None },
            reason_for_miss: if completed { None } else { reason_for_miss },
        }
    }
}

/// A habit paired with its logs, as the report endpoints return it.
#[derive(Debug, Clone, Serialize)]
pub struct HabitWithLogs {
    #[serde(flatten)]
    pub habit: Habit,
    pub logs: Vec<HabitLog>,
}
