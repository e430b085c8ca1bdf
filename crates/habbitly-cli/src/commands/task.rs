//! Task management commands for CLI.

use clap::Subcommand;
use habbitly_core::storage::PlannerDb;
use habbitly_core::Task;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task (appended at the end of the list)
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List tasks in position order
    List,
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// Set completed status
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlannerDb::open()?;

    match action {
        TaskAction::Create { title, description } => {
            let position = db.task_count()?;
            let task = Task::new(&title, &description, position)?;
            db.create_task(&task)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List => {
            let tasks = db.list_tasks()?;
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => match db.get_task(&id)? {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => println!("Task not found: {id}"),
        },
        TaskAction::Update {
            id,
            title,
            description,
            completed,
        } => {
            let mut task = db.get_task(&id)?.ok_or(format!("Task not found: {id}"))?;
            if let Some(t) = title {
                let t = t.trim();
                if t.is_empty() {
                    return Err("task title cannot be empty".into());
                }
                task.title = t.to_string();
            }
            if let Some(d) = description {
                task.description = d;
            }
            if let Some(c) = completed {
                task.completed = c;
            }
            db.update_task(&task)?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            if db.delete_task(&id)? {
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
    }
    Ok(())
}
