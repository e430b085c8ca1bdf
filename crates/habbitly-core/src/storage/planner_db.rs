//! SQLite-based storage for daily tasks and learning roadmaps.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::DatabaseError;
use crate::planner::{LearningRoadmap, LearningStep, Task};

use super::{data_dir, DB_FILE};

fn parse_datetime_fallback(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
    let created_at_str: String = row.get(5)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
        position: row.get(4)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

fn row_to_step(row: &rusqlite::Row) -> Result<LearningStep, rusqlite::Error> {
    Ok(LearningStep {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        completed: row.get(3)?,
    })
}

/// SQLite database for tasks and learning roadmaps.
pub struct PlannerDb {
    conn: Connection,
}

impl PlannerDb {
    /// Open the database at `~/.config/habbitly/habbitly.db`.
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
                "CREATE TABLE IF NOT EXISTS tasks (
                    id          TEXT PRIMARY KEY,
                    title       TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    completed   INTEGER NOT NULL DEFAULT 0,
                    position    INTEGER NOT NULL DEFAULT 0,
                    created_at  TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS learning_roadmaps (
                    id         TEXT PRIMARY KEY,
                    topic      TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS learning_steps (
                    id          TEXT PRIMARY KEY,
                    roadmap_id  TEXT NOT NULL,
                    title       TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    completed   INTEGER NOT NULL DEFAULT 0,
                    position    INTEGER NOT NULL DEFAULT 0
                );

                CREATE INDEX IF NOT EXISTS idx_learning_steps_roadmap
                    ON learning_steps(roadmap_id);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    // === Tasks ===

    pub fn create_task(&self, task: &Task) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO tasks (id, title, description, completed, position, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                task.id,
                task.title,
                task.description,
                task.completed,
                task.position,
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Number of tasks, used to append new tasks at the end of the list.
    pub fn task_count(&self) -> Result<i64, DatabaseError> {
        let count =
            self.conn
                .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get::<_, i64>(0))?;
        Ok(count)
    }

    /// All tasks in list order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, completed, position, created_at
             FROM tasks ORDER BY position ASC, created_at ASC",
        )?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, completed, position, created_at
             FROM tasks WHERE id = ?1",
        )?;
        Ok(stmt.query_row(params![id], row_to_task).optional()?)
    }

    pub fn update_task(&self, task: &Task) -> Result<(), DatabaseError> {
        self.conn.execute(
            "UPDATE tasks
             SET title = ?2, description = ?3, completed = ?4, position = ?5
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.completed,
                task.position,
            ],
        )?;
        Ok(())
    }

    /// Returns true when the task existed.
    pub fn delete_task(&self, id: &str) -> Result<bool, DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // === Learning roadmaps ===

    /// Insert a roadmap together with any steps it already carries.
    pub fn create_roadmap(&self, roadmap: &LearningRoadmap) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO learning_roadmaps (id, topic, created_at) VALUES (?1, ?2, ?3)",
            params![roadmap.id, roadmap.topic, roadmap.created_at.to_rfc3339()],
        )?;
        for (position, step) in roadmap.steps.iter().enumerate() {
            self.insert_step(&roadmap.id, step, position as i64)?;
        }
        Ok(())
    }

    fn insert_step(
        &self,
        roadmap_id: &str,
        step: &LearningStep,
        position: i64,
    ) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO learning_steps (id, roadmap_id, title, description, completed, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                step.id,
                roadmap_id,
                step.title,
                step.description,
                step.completed,
                position,
            ],
        )?;
        Ok(())
    }

    /// Append a step to the end of a roadmap's checklist.
    ///
    /// # Errors
    /// Fails with `QueryFailed` if the roadmap does not exist.
    pub fn add_step(&self, roadmap_id: &str, step: &LearningStep) -> Result<(), DatabaseError> {
        if self.get_roadmap(roadmap_id)?.is_none() {
            return Err(DatabaseError::QueryFailed(format!(
                "roadmap not found: {roadmap_id}"
            )));
        }
        let position = self.conn.query_row(
            "SELECT COUNT(*) FROM learning_steps WHERE roadmap_id = ?1",
            params![roadmap_id],
            |row| row.get::<_, i64>(0),
        )?;
        self.insert_step(roadmap_id, step, position)
    }

    fn steps_for(&self, roadmap_id: &str) -> Result<Vec<LearningStep>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, completed
             FROM learning_steps WHERE roadmap_id = ?1 ORDER BY position ASC",
        )?;
        let steps = stmt
            .query_map(params![roadmap_id], row_to_step)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(steps)
    }

    /// All roadmaps with their steps, oldest first.
    pub fn list_roadmaps(&self) -> Result<Vec<LearningRoadmap>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, topic, created_at FROM learning_roadmaps ORDER BY created_at ASC",
        )?;
        let shells = stmt
            .query_map([], |row| {
                let created_at_str: String = row.get(2)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    created_at_str,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut roadmaps = Vec::with_capacity(shells.len());
        for (id, topic, created_at_str) in shells {
            let steps = self.steps_for(&id)?;
            roadmaps.push(LearningRoadmap {
                id,
                topic,
                steps,
                created_at: parse_datetime_fallback(&created_at_str),
            });
        }
        Ok(roadmaps)
    }

    pub fn get_roadmap(&self, id: &str) -> Result<Option<LearningRoadmap>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, topic, created_at FROM learning_roadmaps WHERE id = ?1")?;
        let shell = stmt
            .query_row(params![id], |row| {
                let created_at_str: String = row.get(2)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    created_at_str,
                ))
            })
            .optional()?;

        match shell {
            Some((id, topic, created_at_str)) => {
                let steps = self.steps_for(&id)?;
                Ok(Some(LearningRoadmap {
                    id,
                    topic,
                    steps,
                    created_at: parse_datetime_fallback(&created_at_str),
                }))
            }
            None => Ok(None),
        }
    }

    /// Flip a step's completion flag. Returns the new state, or None if
    /// the step does not exist.
    pub fn toggle_step(&self, step_id: &str) -> Result<Option<bool>, DatabaseError> {
        let current: Option<bool> = self
            .conn
            .query_row(
                "SELECT completed FROM learning_steps WHERE id = ?1",
                params![step_id],
                |row| row.get(0),
            )
            .optional()?;

        match current {
            Some(completed) => {
                self.conn.execute(
                    "UPDATE learning_steps SET completed = ?2 WHERE id = ?1",
                    params![step_id, !completed],
                )?;
                Ok(Some(!completed))
            }
            None => Ok(None),
        }
    }

    /// Delete a roadmap and all of its steps. Returns true when the
    /// roadmap existed.
    pub fn delete_roadmap(&self, id: &str) -> Result<bool, DatabaseError> {
        self.conn.execute(
            "DELETE FROM learning_steps WHERE roadmap_id = ?1",
            params![id],
        )?;
        let deleted = self
            .conn
            .execute("DELETE FROM learning_roadmaps WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}
