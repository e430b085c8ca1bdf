//! Daily tasks and self-directed learning roadmaps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A one-off daily task on the checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Position in the list; new tasks append at the end.
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with a fresh id at the given list position.
    ///
    /// # Errors
    /// Returns an error if `title` is blank.
    pub fn new(title: &str, description: &str, position: i64) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.trim().to_string(),
            completed: false,
            position,
            created_at: Utc::now(),
        })
    }
}

/// One checklist item on a learning roadmap. Steps live and die with
/// their parent roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl LearningStep {
    /// # Errors
    /// Returns an error if `title` is blank.
    pub fn new(title: &str, description: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.trim().to_string(),
            completed: false,
        })
    }
}

/// A learning topic with its ordered step checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningRoadmap {
    pub id: String,
    pub topic: String,
    pub steps: Vec<LearningStep>,
    pub created_at: DateTime<Utc>,
}

impl LearningRoadmap {
    /// Create an empty roadmap with a fresh id.
    ///
    /// # Errors
    /// Returns an error if `topic` is blank.
    pub fn new(topic: &str) -> Result<Self, ValidationError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::EmptyField("topic"));
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            topic: topic.to_string(),
            steps: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }
}
