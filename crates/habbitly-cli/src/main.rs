use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habbitly", version, about = "Habbitly personal productivity CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Daily habit logging
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Habits scheduled for the current time of day
    Today {
        /// Show every category, not just the active one
        #[arg(long)]
        all: bool,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Income and expense tracking
    Finance {
        #[command(subcommand)]
        action: commands::finance::FinanceAction,
    },
    /// Learning roadmap management
    Learn {
        #[command(subcommand)]
        action: commands::learn::LearnAction,
    },
    /// Habit completion reports
    Report {
        /// Report window: weekly, monthly, or yearly
        #[arg(long, default_value = "weekly")]
        range: String,
        /// Limit the report to one habit
        #[arg(long)]
        habit: Option<String>,
    },
    /// CSV export
    Export {
        #[command(subcommand)]
        action: commands::export::ExportAction,
    },
    /// Generate a motivation tip for a habit
    Motivate {
        /// Habit ID
        habit_id: String,
    },
    /// Session management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Log { action } => commands::log::run(action),
        Commands::Today { all } => commands::today::run(all),
        Commands::Task { action } => commands::task::run(action),
        Commands::Finance { action } => commands::finance::run(action),
        Commands::Learn { action } => commands::learn::run(action),
        Commands::Report { range, habit } => commands::report::run(&range, habit.as_deref()),
        Commands::Export { action } => commands::export::run(action),
        Commands::Motivate { habit_id } => commands::motivate::run(&habit_id),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
