//! Habit completion reports over a bucketed date window.
//!
//! A report walks the day keys produced by [`crate::range`] and pairs
//! each one with the habit's log for that day. Days without a log count
//! as not completed, so every report covers the full window.

use chrono::NaiveDate;
use serde::Serialize;

use crate::habit::{Habit, HabitLog};
use crate::range::{dates_in_range, RangeKind};

/// Outcome for one day of the report window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayOutcome {
    pub date: NaiveDate,
    pub completed: bool,
    /// False when no log exists for this day (placeholder outcome).
    pub logged: bool,
}

/// Completion badge tier shown next to a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateTier {
    High,
    Medium,
    Low,
}

impl RateTier {
    /// Tier for an integer completion percent: above 75 is high, above
    /// 40 medium, anything else low.
    pub fn for_percent(percent: u8) -> Self {
        if percent > 75 {
            RateTier::High
        } else if percent > 40 {
            RateTier::Medium
        } else {
            RateTier::Low
        }
    }
}

/// Per-habit completion summary over a date window.
#[derive(Debug, Clone, Serialize)]
pub struct HabitReport {
    pub habit_id: String,
    pub habit_name: String,
    pub days: Vec<DayOutcome>,
    pub completed_days: usize,
    /// Rounded percent of window days completed.
    pub completion_percent: u8,
    pub tier: RateTier,
}

/// Build the report for one habit over explicit window dates.
///
/// `logs` may contain entries for other habits or days outside the
/// window; both are ignored.
pub fn habit_report(habit: &Habit, logs: &[HabitLog], dates: &[NaiveDate]) -> HabitReport {
    let days: Vec<DayOutcome> = dates
        .iter()
        .map(|date| {
            match logs
                .iter()
                .find(|log| log.habit_id == habit.id && log.date == *date)
            {
                Some(log) => DayOutcome {
                    date: *date,
                    completed: log.completed,
                    logged: true,
                },
                None => DayOutcome {
                    date: *date,
                    completed: false,
                    logged: false,
                },
            }
        })
        .collect();

    let completed_days = days.iter().filter(|d| d.completed).count();
    let completion_percent = if days.is_empty() {
        0
    } else {
        ((completed_days * 100) as f64 / days.len() as f64).round() as u8
    };

    HabitReport {
        habit_id: habit.id.clone(),
        habit_name: habit.name.clone(),
        days,
        completed_days,
        completion_percent,
        tier: RateTier::for_percent(completion_percent),
    }
}

/// Reports for every habit over `kind`'s window ending at `today`.
pub fn build_reports(
    habits: &[Habit],
    logs: &[HabitLog],
    kind: RangeKind,
    today: NaiveDate,
) -> Vec<HabitReport> {
    let dates = dates_in_range(kind, today);
    habits
        .iter()
        .map(|habit| habit_report(habit, logs, &dates))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::HabitCategory;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn habit(name: &str) -> Habit {
        Habit::new(name, HabitCategory::Morning).unwrap()
    }

    #[test]
    fn missing_days_become_uncompleted_placeholders() {
        let h = habit("Journal");
        let logs = vec![HabitLog::new(&h.id, d(2024, 6, 14), true, None, None)];
        let report = habit_report(&h, &logs, &dates_in_range(RangeKind::Weekly, d(2024, 6, 15)));

        assert_eq!(report.days.len(), 7);
        assert_eq!(report.completed_days, 1);
        let unlogged = report.days.iter().filter(|day| !day.logged).count();
        assert_eq!(unlogged, 6);
    }

    #[test]
    fn other_habits_logs_are_ignored() {
        let h = habit("Journal");
        let other = habit("Dhikr");
        let logs = vec![HabitLog::new(&other.id, d(2024, 6, 15), true, None, None)];
        let report = habit_report(&h, &logs, &dates_in_range(RangeKind::Weekly, d(2024, 6, 15)));
        assert_eq!(report.completed_days, 0);
    }

    #[test]
    fn percent_is_rounded() {
        let h = habit("Journal");
        let dates = dates_in_range(RangeKind::Weekly, d(2024, 6, 15));
        let logs: Vec<HabitLog> = dates[..6]
            .iter()
            .map(|date| HabitLog::new(&h.id, *date, true, None, None))
            .collect();
        let report = habit_report(&h, &logs, &dates);
        // 6/7 rounds to 86
        assert_eq!(report.completion_percent, 86);
        assert_eq!(report.tier, RateTier::High);
    }

    #[test]
    fn tier_thresholds_match_badge_colors() {
        assert_eq!(RateTier::for_percent(100), RateTier::High);
        assert_eq!(RateTier::for_percent(76), RateTier::High);
        assert_eq!(RateTier::for_percent(75), RateTier::Medium);
        assert_eq!(RateTier::for_percent(41), RateTier::Medium);
        assert_eq!(RateTier::for_percent(40), RateTier::Low);
        assert_eq!(RateTier::for_percent(0), RateTier::Low);
    }

    #[test]
    fn build_reports_covers_every_habit() {
        let habits = vec![habit("Journal"), habit("Dhikr")];
        let reports = build_reports(&habits, &[], RangeKind::Monthly, d(2025, 1, 1));
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].days.len(), 1);
    }
}
