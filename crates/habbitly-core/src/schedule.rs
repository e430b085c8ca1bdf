//! Habit categories and the time-of-day scheduler.
//!
//! Every habit belongs to one of four categories that partition the day.
//! The scheduler maps an hour of day to the category that is "in focus"
//! right now, which drives the default view of the daily tracker.

use serde::{Deserialize, Serialize};

/// Time-of-day category a habit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    Morning,
    AfterDhuhr,
    AfternoonEvening,
    SleepPrep,
}

impl HabitCategory {
    pub const ALL: [HabitCategory; 4] = [
        HabitCategory::Morning,
        HabitCategory::AfterDhuhr,
        HabitCategory::AfternoonEvening,
        HabitCategory::SleepPrep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HabitCategory::Morning => "morning",
            HabitCategory::AfterDhuhr => "after_dhuhr",
            HabitCategory::AfternoonEvening => "afternoon_evening",
            HabitCategory::SleepPrep => "sleep_prep",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(HabitCategory::Morning),
            "after_dhuhr" => Some(HabitCategory::AfterDhuhr),
            "afternoon_evening" => Some(HabitCategory::AfternoonEvening),
            "sleep_prep" => Some(HabitCategory::SleepPrep),
            _ => None,
        }
    }

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            HabitCategory::Morning => "Morning",
            HabitCategory::AfterDhuhr => "After Dhuhr",
            HabitCategory::AfternoonEvening => "Afternoon & Evening",
            HabitCategory::SleepPrep => "Sleep Prep",
        }
    }
}

/// One row of the schedule table: a category and the closed hour
/// interval it covers. `start_hour > end_hour` denotes a window that
/// wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWindow {
    pub category: HabitCategory,
    pub start_hour: u32,
    pub end_hour: u32,
}

impl CategoryWindow {
    /// Whether `hour` falls inside this window. Both bounds are
    /// inclusive; a wraparound window matches on either side of
    /// midnight.
    pub fn contains(&self, hour: u32) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour <= self.end_hour
        } else {
            hour >= self.start_hour || hour <= self.end_hour
        }
    }
}

/// The default schedule table. The four windows partition all 24 hours:
/// 0-3 belong to the wraparound sleep-prep window, not a gap. The
/// boundary values are load-bearing; do not edit them casually.
pub const DEFAULT_WINDOWS: [CategoryWindow; 4] = [
    CategoryWindow {
        category: HabitCategory::Morning,
        start_hour: 4,
        end_hour: 11,
    },
    CategoryWindow {
        category: HabitCategory::AfterDhuhr,
        start_hour: 12,
        end_hour: 15,
    },
    CategoryWindow {
        category: HabitCategory::AfternoonEvening,
        start_hour: 16,
        end_hour: 21,
    },
    CategoryWindow {
        category: HabitCategory::SleepPrep,
        start_hour: 22,
        end_hour: 3,
    },
];

/// The category in focus at `hour` (0-23), first matching window wins.
///
/// The default table is exhaustive, so the `Morning` fallback only
/// fires for a custom table with gaps -- the tracker always shows
/// something rather than an empty state.
pub fn current_category(hour: u32, windows: &[CategoryWindow]) -> HabitCategory {
    windows
        .iter()
        .find(|w| w.contains(hour))
        .map(|w| w.category)
        .unwrap_or(HabitCategory::Morning)
}
