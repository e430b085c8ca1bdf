pub mod auth;
pub mod config;
pub mod export;
pub mod finance;
pub mod habit;
pub mod learn;
pub mod log;
pub mod motivate;
pub mod report;
pub mod task;
pub mod today;

use chrono::NaiveDate;

/// Parse an explicit `--date` value, defaulting to the local calendar day.
pub(crate) fn parse_date_or_today(
    date: Option<&str>,
) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(s) => Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("invalid date (expected YYYY-MM-DD): {s}"))?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
