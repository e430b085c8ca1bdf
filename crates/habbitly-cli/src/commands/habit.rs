//! Habit management commands for CLI.

use clap::Subcommand;
use habbitly_core::schedule::HabitCategory;
use habbitly_core::storage::HabitDb;
use habbitly_core::Habit;

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Create {
        /// Habit name
        name: String,
        /// Time-of-day category: morning, after_dhuhr, afternoon_evening, or sleep_prep
        #[arg(long, default_value = "morning")]
        category: String,
    },
    /// List habits
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },
    /// Get habit details
    Get {
        /// Habit ID
        id: String,
    },
    /// Update a habit
    Update {
        /// Habit ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a habit and its logs
    Delete {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;

    match action {
        HabitAction::Create { name, category } => {
            let category = HabitCategory::parse(&category)
                .ok_or_else(|| format!("unknown category: {category}"))?;
            let habit = Habit::new(&name, category)?;
            db.create_habit(&habit)?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List { category } => {
            let filter = match category {
                Some(c) => {
                    Some(HabitCategory::parse(&c).ok_or_else(|| format!("unknown category: {c}"))?)
                }
                None => None,
            };
            let habits: Vec<_> = db
                .list_habits()?
                .into_iter()
                .filter(|h| filter.map_or(true, |f| h.category == f))
                .collect();
            println!("{}", serde_json::to_string_pretty(&habits)?);
        }
        HabitAction::Get { id } => match db.get_habit(&id)? {
            Some(habit) => println!("{}", serde_json::to_string_pretty(&habit)?),
            None => println!("Habit not found: {id}"),
        },
        HabitAction::Update { id, name, category } => {
            let mut habit = db.get_habit(&id)?.ok_or(format!("Habit not found: {id}"))?;
            if let Some(n) = name {
                let n = n.trim();
                if n.is_empty() {
                    return Err("habit name cannot be empty".into());
                }
                habit.name = n.to_string();
            }
            if let Some(c) = category {
                habit.category =
                    HabitCategory::parse(&c).ok_or_else(|| format!("unknown category: {c}"))?;
            }
            db.update_habit(&habit)?;
            println!("Habit updated:");
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Delete { id } => {
            if db.delete_habit(&id)? {
                println!("Habit deleted: {id}");
            } else {
                println!("Habit not found: {id}");
            }
        }
    }
    Ok(())
}
