//! CSV export and plain-text rendering.
//!
//! Exports write into in-memory buffers so callers decide where the
//! bytes go (stdout, a file, a test assertion).

use std::collections::HashMap;

use crate::error::CoreError;
use crate::finance::Transaction;
use crate::habit::{Habit, HabitLog};
use crate::planner::LearningRoadmap;
use crate::report::{HabitReport, RateTier};

fn tier_label(tier: RateTier) -> &'static str {
    match tier {
        RateTier::High => "high",
        RateTier::Medium => "medium",
        RateTier::Low => "low",
    }
}

/// Render habit logs as CSV with a header row.
///
/// Rows are emitted in the order given; the habit name column is
/// resolved from `habits` and left empty for unknown habit ids.
///
/// # Errors
/// Returns an error if a record cannot be written or the buffer does
/// not hold valid UTF-8.
pub fn habit_logs_csv(habits: &[Habit], logs: &[HabitLog]) -> Result<String, CoreError> {
    let names: HashMap<&str, &str> = habits
        .iter()
        .map(|h| (h.id.as_str(), h.name.as_str()))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", "habit", "completed", "journal", "reason_for_miss"])?;
    for log in logs {
        writer.write_record([
            log.date.format("%Y-%m-%d").to_string().as_str(),
            names.get(log.habit_id.as_str()).copied().unwrap_or(""),
            if log.completed { "true" } else { "false" },
            log.journal.as_deref().unwrap_or(""),
            log.reason_for_miss.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Custom(e.to_string()))?;
    Ok(String::from_utf8(bytes).map_err(|e| CoreError::Custom(e.to_string()))?)
}

/// Render transactions as CSV with a header row.
///
/// # Errors
/// Returns an error if a record cannot be written or the buffer does
/// not hold valid UTF-8.
pub fn transactions_csv(transactions: &[Transaction]) -> Result<String, CoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", "kind", "amount", "category", "description"])?;
    for tx in transactions {
        writer.write_record([
            tx.date.format("%Y-%m-%d").to_string().as_str(),
            tx.kind.as_str(),
            tx.amount.to_string().as_str(),
            tx.category.as_str(),
            tx.description.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Custom(e.to_string()))?;
    Ok(String::from_utf8(bytes).map_err(|e| CoreError::Custom(e.to_string()))?)
}

/// Plain-text rendering of one report, one line per day.
pub fn render_habit_report(report: &HabitReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}: {}% ({}/{} days, {})\n",
        report.habit_name,
        report.completion_percent,
        report.completed_days,
        report.days.len(),
        tier_label(report.tier),
    ));
    for day in &report.days {
        let mark = match (day.logged, day.completed) {
            (_, true) => "x",
            (true, false) => "-",
            (false, false) => " ",
        };
        out.push_str(&format!("  [{}] {}\n", mark, day.date.format("%Y-%m-%d")));
    }
    out
}

/// Plain-text rendering of a roadmap with step progress.
pub fn render_roadmap(roadmap: &LearningRoadmap) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}/{} steps)\n",
        roadmap.topic,
        roadmap.completed_steps(),
        roadmap.steps.len(),
    ));
    for (i, step) in roadmap.steps.iter().enumerate() {
        let mark = if step.completed { "x" } else { " " };
        out.push_str(&format!("  {}. [{}] {}\n", i + 1, mark, step.title));
        if !step.description.is_empty() {
            out.push_str(&format!("         {}\n", step.description));
        }
    }
    out
}
