//! # Habbitly Core Library
//!
//! This library provides the core business logic for Habbitly, a personal
//! productivity tracker covering daily habits, finances, tasks, and learning
//! roadmaps. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI would be a thin layer over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Range Engine**: Pure date bucketing that expands weekly, monthly, and
//!   yearly windows into the ISO day keys they cover
//! - **Scheduler**: Hour-of-day category windows deciding which habit group
//!   is active right now
//! - **Storage**: SQLite-based stores for habits, finances, and planning,
//!   plus TOML-based configuration
//! - **Reporting**: Completion reports, finance summaries, and CSV export
//! - **Motivation**: HTTP client for the external tip-generation service
//!
//! ## Key Components
//!
//! - [`dates_in_range`]: Window expansion for reports and filters
//! - [`current_category`]: Time-of-day habit category lookup
//! - [`HabitDb`], [`FinanceDb`], [`PlannerDb`]: Persistence
//! - [`Config`]: Application configuration management
//! - [`MotivationClient`]: External service collaborator

pub mod auth;
pub mod error;
pub mod export;
pub mod finance;
pub mod habit;
pub mod motivation;
pub mod planner;
pub mod range;
pub mod report;
pub mod schedule;
pub mod storage;

pub use error::{ConfigError, CoreError, DatabaseError, MotivationError, ValidationError};
pub use finance::{
    category_summary, filter_transactions, monthly_summary, CategoryTotal, FilterRange,
    MonthlyTotals, Transaction, TransactionKind,
};
pub use habit::{Habit, HabitLog, HabitWithLogs};
pub use motivation::{request_for_habit, MotivationClient, MotivationRequest, FALLBACK_TIP};
pub use planner::{LearningRoadmap, LearningStep, Task};
pub use range::{dates_in_range, iso_day_keys, RangeKind};
pub use report::{build_reports, habit_report, HabitReport, RateTier};
pub use schedule::{current_category, CategoryWindow, HabitCategory, DEFAULT_WINDOWS};
pub use storage::{AuthConfig, Config, FinanceDb, HabitDb, MotivationConfig, PlannerDb};
