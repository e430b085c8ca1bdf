//! Learning roadmap commands for CLI.

use clap::Subcommand;
use habbitly_core::export::render_roadmap;
use habbitly_core::planner::{LearningRoadmap, LearningStep};
use habbitly_core::storage::PlannerDb;

#[derive(Subcommand)]
pub enum LearnAction {
    /// Create a roadmap, optionally with initial steps
    Create {
        /// Roadmap topic
        topic: String,
        /// Initial step titles
        #[arg(long = "step")]
        steps: Vec<String>,
    },
    /// List roadmaps with progress
    List,
    /// Show one roadmap with its steps
    Show {
        /// Roadmap ID
        id: String,
    },
    /// Append a step to a roadmap
    AddStep {
        /// Roadmap ID
        roadmap_id: String,
        /// Step title
        title: String,
        /// Step description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Toggle a step's completed flag
    ToggleStep {
        /// Step ID
        step_id: String,
    },
    /// Delete a roadmap and all its steps
    Delete {
        /// Roadmap ID
        id: String,
    },
}

pub fn run(action: LearnAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlannerDb::open()?;

    match action {
        LearnAction::Create { topic, steps } => {
            let mut roadmap = LearningRoadmap::new(&topic)?;
            for title in steps {
                roadmap.steps.push(LearningStep::new(&title, "")?);
            }
            db.create_roadmap(&roadmap)?;
            println!("Roadmap created: {}", roadmap.id);
            println!("{}", serde_json::to_string_pretty(&roadmap)?);
        }
        LearnAction::List => {
            let roadmaps = db.list_roadmaps()?;
            for roadmap in &roadmaps {
                println!(
                    "{}  {} ({}/{} steps)",
                    roadmap.id,
                    roadmap.topic,
                    roadmap.completed_steps(),
                    roadmap.steps.len()
                );
            }
        }
        LearnAction::Show { id } => match db.get_roadmap(&id)? {
            Some(roadmap) => print!("{}", render_roadmap(&roadmap)),
            None => println!("Roadmap not found: {id}"),
        },
        LearnAction::AddStep {
            roadmap_id,
            title,
            description,
        } => {
            let step = LearningStep::new(&title, &description)?;
            db.add_step(&roadmap_id, &step)?;
            println!("Step added: {}", step.id);
        }
        LearnAction::ToggleStep { step_id } => match db.toggle_step(&step_id)? {
            Some(completed) => println!(
                "Step {} is now {}",
                step_id,
                if completed { "completed" } else { "pending" }
            ),
            None => println!("Step not found: {step_id}"),
        },
        LearnAction::Delete { id } => {
            if db.delete_roadmap(&id)? {
                println!("Roadmap deleted: {id}");
            } else {
                println!("Roadmap not found: {id}");
            }
        }
    }
    Ok(())
}
