//! End-to-end flow through the SQLite stores: record habits and logs,
//! build reports over real date windows, and export the results.

use chrono::NaiveDate;
use tempfile::tempdir;

use habbitly_core::export::{habit_logs_csv, transactions_csv};
use habbitly_core::finance::{filter_transactions, FilterRange, Transaction, TransactionKind};
use habbitly_core::habit::{Habit, HabitLog};
use habbitly_core::motivation::request_for_habit;
use habbitly_core::range::RangeKind;
use habbitly_core::report::{build_reports, RateTier};
use habbitly_core::schedule::HabitCategory;
use habbitly_core::storage::{FinanceDb, HabitDb};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn weekly_report_over_persisted_logs() {
    let dir = tempdir().unwrap();
    let db = HabitDb::open_at(&dir.path().join("habbitly.db")).unwrap();

    let habit = Habit::new("Fajr prayer", HabitCategory::Morning).unwrap();
    db.create_habit(&habit).unwrap();

    // Window ending 2024-03-01 reaches back across Feb 29.
    let today = d(2024, 3, 1);
    for (date, completed) in [
        (d(2024, 2, 24), true),
        (d(2024, 2, 25), true),
        (d(2024, 2, 26), false),
        (d(2024, 2, 29), true),
        (d(2024, 3, 1), true),
    ] {
        let reason = (!completed).then(|| "overslept".to_string());
        db.upsert_log(&HabitLog::new(&habit.id, date, completed, None, reason))
            .unwrap();
    }

    let habits = db.list_habits().unwrap();
    let logs = db.list_logs().unwrap();
    let reports = build_reports(&habits, &logs, RangeKind::Weekly, today);

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.days.len(), 7);
    assert_eq!(report.days[0].date, d(2024, 2, 24));
    assert_eq!(report.days[5].date, d(2024, 2, 29));
    assert_eq!(report.completed_days, 4);
    // 4/7 rounds to 57, medium tier.
    assert_eq!(report.completion_percent, 57);
    assert_eq!(report.tier, RateTier::Medium);
    // The two unlogged days come back as placeholders.
    assert_eq!(report.days.iter().filter(|day| !day.logged).count(), 2);
}

#[test]
fn rerecording_a_day_overwrites_in_place() {
    let dir = tempdir().unwrap();
    let db = HabitDb::open_at(&dir.path().join("habbitly.db")).unwrap();

    let habit = Habit::new("Evening review", HabitCategory::SleepPrep).unwrap();
    db.create_habit(&habit).unwrap();

    let first = db
        .upsert_log(&HabitLog::new(
            &habit.id,
            d(2024, 6, 10),
            false,
            None,
            Some("forgot".into()),
        ))
        .unwrap();
    let second = db
        .upsert_log(&HabitLog::new(
            &habit.id,
            d(2024, 6, 10),
            true,
            Some("caught up late".into()),
            None,
        ))
        .unwrap();

    assert_eq!(first.id, second.id);
    assert!(second.completed);
    assert!(second.reason_for_miss.is_none());
    assert_eq!(db.logs_for_habit(&habit.id).unwrap().len(), 1);
}

#[test]
fn motivation_request_reflects_stored_week() {
    let dir = tempdir().unwrap();
    let db = HabitDb::open_at(&dir.path().join("habbitly.db")).unwrap();

    let habit = Habit::new("Deep work", HabitCategory::AfterDhuhr).unwrap();
    db.create_habit(&habit).unwrap();
    let today = d(2024, 6, 15);
    db.upsert_log(&HabitLog::new(&habit.id, d(2024, 6, 14), true, None, None))
        .unwrap();
    db.upsert_log(&HabitLog::new(
        &habit.id,
        d(2024, 6, 13),
        false,
        None,
        Some("meetings all day".into()),
    ))
    .unwrap();

    let logs = db.logs_for_habit(&habit.id).unwrap();
    let request = request_for_habit(&habit, &logs, today);
    assert_eq!(request.habit_name, "Deep work");
    assert!((request.completion_rate - 1.0 / 7.0).abs() < 1e-9);
    assert_eq!(request.reasons_for_missing, "meetings all day");
}

#[test]
fn habit_log_export_covers_stored_rows() {
    let dir = tempdir().unwrap();
    let db = HabitDb::open_at(&dir.path().join("habbitly.db")).unwrap();

    let habit = Habit::new("Read", HabitCategory::SleepPrep).unwrap();
    db.create_habit(&habit).unwrap();
    db.upsert_log(&HabitLog::new(
        &habit.id,
        d(2024, 6, 1),
        true,
        Some("20 pages".into()),
        None,
    ))
    .unwrap();

    let csv = habit_logs_csv(&db.list_habits().unwrap(), &db.list_logs().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "date,habit,completed,journal,reason_for_miss");
    assert_eq!(lines[1], "2024-06-01,Read,true,20 pages,");
}

#[test]
fn finance_filter_and_export_round_trip() {
    let dir = tempdir().unwrap();
    let db = FinanceDb::open_at(&dir.path().join("habbitly.db")).unwrap();

    let today = d(2024, 6, 15);
    let this_month =
        Transaction::new(d(2024, 6, 3), TransactionKind::Expense, 75_000, "Food", "Groceries")
            .unwrap();
    let last_month =
        Transaction::new(d(2024, 5, 20), TransactionKind::Income, 5_000_000, "Salary", "")
            .unwrap();
    db.create_transaction(&this_month).unwrap();
    db.create_transaction(&last_month).unwrap();

    let all = db.list_transactions().unwrap();
    assert_eq!(all.len(), 2);

    let current = filter_transactions(&all, FilterRange::ThisMonth, today);
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, this_month.id);

    let previous = filter_transactions(&all, FilterRange::LastMonth, today);
    assert_eq!(previous.len(), 1);
    assert_eq!(previous[0].id, last_month.id);

    let csv = transactions_csv(&all).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("2024-06-03,expense,75000,Food,Groceries"));
}
