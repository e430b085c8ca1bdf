//! Session commands for CLI.

use clap::Subcommand;
use habbitly_core::auth;
use habbitly_core::storage::HabitDb;
use habbitly_core::Config;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in with the configured credentials
    Login {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// Clear the current session
    Logout,
    /// Show whether a session is active
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = HabitDb::open()?;

    match action {
        AuthAction::Login { username, password } => {
            let config = Config::load_or_default();
            if auth::login(&db, &config.auth, &username, &password)? {
                println!("logged in");
            } else {
                eprintln!("invalid credentials");
                std::process::exit(1);
            }
        }
        AuthAction::Logout => {
            auth::logout(&db)?;
            println!("logged out");
        }
        AuthAction::Status => {
            if auth::is_logged_in(&db)? {
                println!("logged in");
            } else {
                println!("logged out");
            }
        }
    }
    Ok(())
}
