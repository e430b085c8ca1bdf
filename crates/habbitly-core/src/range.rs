//! Reporting date ranges anchored at a given day.
//!
//! Reports aggregate habit logs and transactions per calendar day. This
//! module turns a symbolic range selector (weekly, monthly, yearly) into
//! the ordered list of days it denotes, so every consumer buckets over
//! the exact same keys.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A named aggregation window anchored at "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    /// Today and the six days before it.
    Weekly,
    /// The 1st of today's month through today.
    Monthly,
    /// January 1 of today's year through today.
    Yearly,
}

impl RangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKind::Weekly => "weekly",
            RangeKind::Monthly => "monthly",
            RangeKind::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(RangeKind::Weekly),
            "monthly" => Some(RangeKind::Monthly),
            "yearly" => Some(RangeKind::Yearly),
            _ => None,
        }
    }
}

/// All calendar days in `kind`'s window ending at `today`, ascending.
///
/// Always non-empty, strictly ascending, one day apart, and ending at
/// `today`. Only the calendar date of the anchor matters; time of day
/// never enters the computation.
pub fn dates_in_range(kind: RangeKind, today: NaiveDate) -> Vec<NaiveDate> {
    let start = match kind {
        RangeKind::Weekly => today - Days::new(6),
        RangeKind::Monthly => today.with_day(1).unwrap_or(today),
        RangeKind::Yearly => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
    };
    start.iter_days().take_while(|d| *d <= today).collect()
}

/// `YYYY-MM-DD` keys for `dates_in_range`; lexicographic order on these
/// strings equals chronological order.
pub fn iso_day_keys(kind: RangeKind, today: NaiveDate) -> Vec<String> {
    dates_in_range(kind, today)
        .into_iter()
        .map(|d| day_key(d))
        .collect()
}

/// Canonical `YYYY-MM-DD` key for a calendar day.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekly_is_seven_days_ending_today() {
        let today = d(2024, 6, 15);
        let dates = dates_in_range(RangeKind::Weekly, today);
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], d(2024, 6, 9));
        assert_eq!(*dates.last().unwrap(), today);
    }

    #[test]
    fn weekly_crosses_leap_month_boundary() {
        let dates = dates_in_range(RangeKind::Weekly, d(2024, 3, 1));
        let expected = [
            d(2024, 2, 24),
            d(2024, 2, 25),
            d(2024, 2, 26),
            d(2024, 2, 27),
            d(2024, 2, 28),
            d(2024, 2, 29),
            d(2024, 3, 1),
        ];
        assert_eq!(dates, expected);
    }

    #[test]
    fn weekly_crosses_year_boundary() {
        let dates = dates_in_range(RangeKind::Weekly, d(2025, 1, 2));
        assert_eq!(dates[0], d(2024, 12, 27));
        assert_eq!(*dates.last().unwrap(), d(2025, 1, 2));
    }

    #[test]
    fn monthly_runs_from_first_of_month() {
        let dates = dates_in_range(RangeKind::Monthly, d(2024, 6, 15));
        assert_eq!(dates.len(), 15);
        assert_eq!(dates[0], d(2024, 6, 1));
        assert_eq!(*dates.last().unwrap(), d(2024, 6, 15));
    }

    #[test]
    fn monthly_on_the_first_is_a_single_day() {
        assert_eq!(
            dates_in_range(RangeKind::Monthly, d(2025, 1, 1)),
            vec![d(2025, 1, 1)]
        );
    }

    #[test]
    fn yearly_on_jan_first_is_a_single_day() {
        assert_eq!(
            dates_in_range(RangeKind::Yearly, d(2025, 1, 1)),
            vec![d(2025, 1, 1)]
        );
    }

    #[test]
    fn yearly_on_leap_day_counts_sixty_days() {
        let dates = dates_in_range(RangeKind::Yearly, d(2024, 2, 29));
        assert_eq!(dates.len(), 60);
        assert_eq!(dates[0], d(2024, 1, 1));
        assert_eq!(*dates.last().unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn yearly_length_matches_leap_status() {
        assert_eq!(dates_in_range(RangeKind::Yearly, d(2024, 12, 31)).len(), 366);
        assert_eq!(dates_in_range(RangeKind::Yearly, d(2025, 12, 31)).len(), 365);
    }

    #[test]
    fn yearly_length_is_ordinal_day() {
        let today = d(2024, 6, 15);
        assert_eq!(
            dates_in_range(RangeKind::Yearly, today).len(),
            today.ordinal() as usize
        );
    }

    #[test]
    fn day_keys_sort_chronologically() {
        let keys = iso_day_keys(RangeKind::Weekly, d(2024, 3, 1));
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], "2024-02-24");
    }

    #[test]
    fn range_kind_parse_round_trips() {
        for kind in [RangeKind::Weekly, RangeKind::Monthly, RangeKind::Yearly] {
            assert_eq!(RangeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RangeKind::parse("daily"), None);
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1970i32..2100, 1u32..=366).prop_filter_map("valid ordinal", |(y, ord)| {
            NaiveDate::from_yo_opt(y, ord)
        })
    }

    proptest! {
        #[test]
        fn every_range_ends_today_and_steps_by_one_day(today in any_date()) {
            for kind in [RangeKind::Weekly, RangeKind::Monthly, RangeKind::Yearly] {
                let dates = dates_in_range(kind, today);
                prop_assert!(!dates.is_empty());
                prop_assert_eq!(*dates.last().unwrap(), today);
                for pair in dates.windows(2) {
                    prop_assert_eq!(pair[0] + Days::new(1), pair[1]);
                }
            }
        }

        #[test]
        fn weekly_always_has_seven_days(today in any_date()) {
            prop_assert_eq!(dates_in_range(RangeKind::Weekly, today).len(), 7);
        }

        #[test]
        fn monthly_starts_on_the_first(today in any_date()) {
            let dates = dates_in_range(RangeKind::Monthly, today);
            prop_assert_eq!(dates[0].day(), 1);
            prop_assert_eq!(dates.len(), today.day() as usize);
        }
    }
}
