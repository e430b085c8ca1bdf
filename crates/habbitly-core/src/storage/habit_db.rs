//! SQLite-based storage for habits and their daily logs.
//!
//! Also owns the small kv table used for the demo session flag.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::DatabaseError;
use crate::habit::{Habit, HabitLog};
use crate::schedule::HabitCategory;

use super::{data_dir, DB_FILE};

/// Parse a stored `YYYY-MM-DD` day key, defaulting on corrupt rows.
fn parse_day_fallback(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

/// Parse a stored RFC 3339 timestamp with fallback to the current time.
fn parse_datetime_fallback(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn row_to_habit(row: &rusqlite::Row) -> Result<Habit, rusqlite::Error> {
    let category_str: String = row.get(2)?;
    let created_at_str: String = row.get(3)?;
    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        category: HabitCategory::parse(&category_str).unwrap_or(HabitCategory::Morning),
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

fn row_to_log(row: &rusqlite::Row) -> Result<HabitLog, rusqlite::Error> {
    let date_str: String = row.get(2)?;
    Ok(HabitLog {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        date: parse_day_fallback(&date_str),
        completed: row.get(3)?,
        journal: row.get(4)?,
        reason_for_miss: row.get(5)?,
    })
}

/// SQLite database for habits and habit logs.
pub struct HabitDb {
    conn: Connection,
}

impl HabitDb {
    /// Open the database at `~/.config/habbitly/habbitly.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join(DB_FILE);
        Self::open_at(&path)
    }

    /// Open the database at an explicit path (tests, exports).
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS habits (
                    id         TEXT PRIMARY KEY,
                    name       TEXT NOT NULL,
                    category   TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS habit_logs (
                    id              TEXT PRIMARY KEY,
                    habit_id        TEXT NOT NULL,
                    date            TEXT NOT NULL,
                    completed       INTEGER NOT NULL DEFAULT 0,
                    journal         TEXT,
                    reason_for_miss TEXT,
                    UNIQUE(habit_id, date)
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_habit_logs_date ON habit_logs(date);
                CREATE INDEX IF NOT EXISTS idx_habit_logs_habit ON habit_logs(habit_id);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    pub fn create_habit(&self, habit: &Habit) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO habits (id, name, category, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                habit.id,
                habit.name,
                habit.category.as_str(),
                habit.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All habits, oldest first.
    pub fn list_habits(&self) -> Result<Vec<Habit>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category, created_at FROM habits ORDER BY created_at ASC",
        )?;
        let habits = stmt
            .query_map([], row_to_habit)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(habits)
    }

    pub fn get_habit(&self, id: &str) -> Result<Option<Habit>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, category, created_at FROM habits WHERE id = ?1")?;
        Ok(stmt.query_row(params![id], row_to_habit).optional()?)
    }

    pub fn update_habit(&self, habit: &Habit) -> Result<(), DatabaseError> {
        self.conn.execute(
            "UPDATE habits SET name = ?2, category = ?3 WHERE id = ?1",
            params![habit.id, habit.name, habit.category.as_str()],
        )?;
        Ok(())
    }

    /// Delete a habit and all of its logs. Returns true when the habit
    /// existed.
    pub fn delete_habit(&self, id: &str) -> Result<bool, DatabaseError> {
        self.conn
            .execute("DELETE FROM habit_logs WHERE habit_id = ?1", params![id])?;
        let deleted = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Record a day's outcome. At most one log exists per (habit, date);
    /// a second write for the same day overwrites the earlier entry and
    /// keeps its id. Returns the stored row.
    pub fn upsert_log(&self, log: &HabitLog) -> Result<HabitLog, DatabaseError> {
        let day = log.date.format("%Y-%m-%d").to_string();
        self.conn.execute(
            "INSERT INTO habit_logs (id, habit_id, date, completed, journal, reason_for_miss)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(habit_id, date) DO UPDATE SET
                completed = excluded.completed,
                journal = excluded.journal,
                reason_for_miss = excluded.reason_for_miss",
            params![
                log.id,
                log.habit_id,
                day,
                log.completed,
                log.journal,
                log.reason_for_miss,
            ],
        )?;
        self.get_log(&log.habit_id, log.date)?
            .ok_or_else(|| DatabaseError::QueryFailed("upserted log vanished".to_string()))
    }

    pub fn get_log(
        &self,
        habit_id: &str,
        date: NaiveDate,
    ) -> Result<Option<HabitLog>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, completed, journal, reason_for_miss
             FROM habit_logs WHERE habit_id = ?1 AND date = ?2",
        )?;
        Ok(stmt
            .query_row(
                params![habit_id, date.format("%Y-%m-%d").to_string()],
                row_to_log,
            )
            .optional()?)
    }

    /// All logs for one calendar day, across habits.
    pub fn logs_for_date(&self, date: NaiveDate) -> Result<Vec<HabitLog>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, completed, journal, reason_for_miss
             FROM habit_logs WHERE date = ?1 ORDER BY habit_id ASC",
        )?;
        let logs = stmt
            .query_map(params![date.format("%Y-%m-%d").to_string()], row_to_log)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    /// All logs for one habit, oldest day first.
    pub fn logs_for_habit(&self, habit_id: &str) -> Result<Vec<HabitLog>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, completed, journal, reason_for_miss
             FROM habit_logs WHERE habit_id = ?1 ORDER BY date ASC",
        )?;
        let logs = stmt
            .query_map(params![habit_id], row_to_log)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    /// Every log in the store, oldest day first.
    pub fn list_logs(&self) -> Result<Vec<HabitLog>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, completed, journal, reason_for_miss
             FROM habit_logs ORDER BY date ASC, habit_id ASC",
        )?;
        let logs = stmt
            .query_map([], row_to_log)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(logs)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        Ok(stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_habit(name: &str) -> Habit {
        Habit::new(name, HabitCategory::Morning).unwrap()
    }

    #[test]
    fn habit_crud_round_trip() {
        let db = HabitDb::open_memory().unwrap();
        let mut habit = sample_habit("Journal");
        db.create_habit(&habit).unwrap();

        assert_eq!(db.list_habits().unwrap().len(), 1);
        assert_eq!(db.get_habit(&habit.id).unwrap().unwrap().name, "Journal");

        habit.name = "Morning Journal".to_string();
        habit.category = HabitCategory::SleepPrep;
        db.update_habit(&habit).unwrap();
        let stored = db.get_habit(&habit.id).unwrap().unwrap();
        assert_eq!(stored.name, "Morning Journal");
        assert_eq!(stored.category, HabitCategory::SleepPrep);

        assert!(db.delete_habit(&habit.id).unwrap());
        assert!(db.get_habit(&habit.id).unwrap().is_none());
        assert!(!db.delete_habit(&habit.id).unwrap());
    }

    #[test]
    fn second_log_for_same_day_overwrites() {
        let db = HabitDb::open_memory().unwrap();
        let habit = sample_habit("Journal");
        db.create_habit(&habit).unwrap();

        let first = HabitLog::new(&habit.id, d(2024, 6, 1), false, None, Some("too busy".into()));
        let stored = db.upsert_log(&first).unwrap();
        assert!(!stored.completed);

        let second = HabitLog::new(&habit.id, d(2024, 6, 1), true, Some("made it".into()), None);
        let stored = db.upsert_log(&second).unwrap();
        assert!(stored.completed);
        assert_eq!(stored.journal.as_deref(), Some("made it"));
        assert!(stored.reason_for_miss.is_none());
        // id of the original row survives the overwrite
        assert_eq!(stored.id, first.id);

        assert_eq!(db.logs_for_habit(&habit.id).unwrap().len(), 1);
    }

    #[test]
    fn deleting_a_habit_deletes_its_logs() {
        let db = HabitDb::open_memory().unwrap();
        let habit = sample_habit("Journal");
        let other = sample_habit("Dhikr");
        db.create_habit(&habit).unwrap();
        db.create_habit(&other).unwrap();
        db.upsert_log(&HabitLog::new(&habit.id, d(2024, 6, 1), true, None, None))
            .unwrap();
        db.upsert_log(&HabitLog::new(&other.id, d(2024, 6, 1), true, None, None))
            .unwrap();

        db.delete_habit(&habit.id).unwrap();
        assert!(db.logs_for_habit(&habit.id).unwrap().is_empty());
        assert_eq!(db.logs_for_date(d(2024, 6, 1)).unwrap().len(), 1);
    }

    #[test]
    fn logs_for_habit_are_date_ordered() {
        let db = HabitDb::open_memory().unwrap();
        let habit = sample_habit("Journal");
        db.create_habit(&habit).unwrap();
        for day in [d(2024, 3, 1), d(2024, 2, 28), d(2024, 2, 29)] {
            db.upsert_log(&HabitLog::new(&habit.id, day, true, None, None))
                .unwrap();
        }
        let logs = db.logs_for_habit(&habit.id).unwrap();
        let days: Vec<NaiveDate> = logs.iter().map(|l| l.date).collect();
        assert_eq!(days, vec![d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1)]);
    }

    #[test]
    fn kv_store() {
        let db = HabitDb::open_memory().unwrap();
        assert!(db.kv_get("flag").unwrap().is_none());
        db.kv_set("flag", "true").unwrap();
        assert_eq!(db.kv_get("flag").unwrap().as_deref(), Some("true"));
        db.kv_delete("flag").unwrap();
        assert!(db.kv_get("flag").unwrap().is_none());
    }
}
