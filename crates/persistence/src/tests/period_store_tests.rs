// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-trip tests for the evaluation-period store against in-memory
//! SQLite.

use crate::{Persistence, PersistenceError};
use reviewd::EvaluationPeriod;
use reviewd_domain::{GradeRange, PeriodStatus, Schedule};
use time::{Date, Month};

fn day(month: Month, d: u8) -> Date {
    Date::from_calendar_date(2026, month, d).unwrap()
}

fn test_schedule(start: Date, peer: Date) -> Schedule {
    Schedule {
        start_date: start,
        end_date: None,
        evaluation_setup_deadline: None,
        performance_deadline: None,
        self_evaluation_deadline: None,
        peer_evaluation_deadline: peer,
    }
}

fn test_period(name: &str, start: Date, peer: Date, now: Date) -> EvaluationPeriod {
    EvaluationPeriod::create(
        name.to_string(),
        Some(String::from("stored for tests")),
        test_schedule(start, peer),
        120,
        vec![
            GradeRange {
                grade: String::from("A"),
                min_range: 80,
                max_range: 100,
            },
            GradeRange {
                grade: String::from("B"),
                min_range: 0,
                max_range: 79,
            },
        ],
        &[],
        now,
        "hr-admin",
        "2026-01-01T00:00:00Z",
    )
    .expect("test period should validate")
}

#[test]
fn test_create_and_get_round_trip() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");
    let mut period = test_period(
        "2026 H1",
        day(Month::March, 1),
        day(Month::June, 30),
        day(Month::February, 1),
    );

    let period_id = store.create_period(&period).expect("insert");
    assert!(period_id > 0);

    period.period_id = period_id;
    let loaded = store.get_period(period_id).expect("load");
    assert_eq!(loaded, period);
}

#[test]
fn test_get_missing_period_not_found() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");

    let result = store.get_period(42);
    assert_eq!(result, Err(PersistenceError::PeriodNotFound(42)));
}

#[test]
fn test_update_unknown_period_not_found() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");
    let mut period = test_period(
        "2026 H1",
        day(Month::March, 1),
        day(Month::June, 30),
        day(Month::February, 1),
    );
    period.period_id = 99;

    let result = store.update_period(&period);
    assert_eq!(result, Err(PersistenceError::PeriodNotFound(99)));
}

#[test]
fn test_soft_deleted_period_is_hidden() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");
    let mut period = test_period(
        "2026 H1",
        day(Month::March, 1),
        day(Month::June, 30),
        day(Month::February, 1),
    );
    period.period_id = store.create_period(&period).expect("insert");

    period
        .soft_delete("hr-admin", "2026-02-02T00:00:00Z")
        .expect("delete");
    store.update_period(&period).expect("persist delete");

    assert_eq!(
        store.get_period(period.period_id),
        Err(PersistenceError::PeriodNotFound(period.period_id))
    );
    assert!(store.list_periods().expect("list").is_empty());
    assert!(store.list_siblings().expect("siblings").is_empty());
}

#[test]
fn test_list_orders_by_start_date() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");

    let later = test_period(
        "2026 H2",
        day(Month::July, 1),
        day(Month::December, 31),
        day(Month::January, 1),
    );
    let earlier = test_period(
        "2026 H1",
        day(Month::January, 10),
        day(Month::June, 30),
        day(Month::January, 1),
    );
    store.create_period(&later).expect("insert later");
    store.create_period(&earlier).expect("insert earlier");

    let names: Vec<String> = store
        .list_periods()
        .expect("list")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["2026 H1", "2026 H2"]);
}

#[test]
fn test_active_periods_read_stored_status() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");

    // Created before its start date, so stored as waiting.
    let waiting = test_period(
        "2026 H2",
        day(Month::July, 1),
        day(Month::December, 31),
        day(Month::January, 1),
    );
    assert_eq!(waiting.status, PeriodStatus::Waiting);
    store.create_period(&waiting).expect("insert waiting");

    assert!(store.list_active_periods().expect("active").is_empty());

    // Created on its start date, so stored as in progress.
    let running = test_period(
        "2026 H1",
        day(Month::January, 10),
        day(Month::June, 30),
        day(Month::January, 10),
    );
    assert_eq!(running.status, PeriodStatus::InProgress);
    store.create_period(&running).expect("insert running");

    let active = store.list_active_periods().expect("active");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "2026 H1");
}

#[test]
fn test_list_paged_windows_and_counts() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");

    for (name, start_month) in [
        ("2026 Q1", Month::January),
        ("2026 Q2", Month::April),
        ("2026 Q3", Month::July),
    ] {
        let period = test_period(
            name,
            day(start_month, 1),
            day(start_month, 28),
            day(Month::January, 1),
        );
        store.create_period(&period).expect("insert");
    }

    let (first_page, total) = store.list_periods_paged(0, 2).expect("first page");
    assert_eq!(total, 3);
    let names: Vec<&str> = first_page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["2026 Q1", "2026 Q2"]);

    let (second_page, total) = store.list_periods_paged(2, 2).expect("second page");
    assert_eq!(total, 3);
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].name, "2026 Q3");
}

#[test]
fn test_update_replaces_grade_ranges() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");
    let mut period = test_period(
        "2026 H1",
        day(Month::March, 1),
        day(Month::June, 30),
        day(Month::February, 1),
    );
    period.period_id = store.create_period(&period).expect("insert");

    period
        .replace_grade_ranges(
            vec![GradeRange {
                grade: String::from("S"),
                min_range: 0,
                max_range: 100,
            }],
            "hr-admin",
            "2026-02-03T00:00:00Z",
        )
        .expect("replace");
    store.update_period(&period).expect("persist");

    let loaded = store.get_period(period.period_id).expect("load");
    assert_eq!(loaded.grade_ranges.len(), 1);
    assert_eq!(loaded.grade_ranges[0].grade, "S");
}

#[test]
fn test_siblings_use_effective_end_date() {
    let mut store = Persistence::new_in_memory().expect("in-memory store");

    let mut with_end = test_period(
        "2026 H1",
        day(Month::March, 1),
        day(Month::June, 30),
        day(Month::February, 1),
    );
    with_end.schedule.end_date = Some(day(Month::July, 15));
    store.create_period(&with_end).expect("insert");

    let siblings = store.list_siblings().expect("siblings");
    assert_eq!(siblings.len(), 1);
    assert_eq!(siblings[0].start_date, day(Month::March, 1));
    assert_eq!(siblings[0].end_date, day(Month::July, 15));
}

#[test]
fn test_file_backed_store_survives_reopen() {
    let dir = std::env::temp_dir().join(format!("reviewd_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let db_path = dir.join("periods.sqlite");

    let period_id = {
        let mut store = Persistence::new_with_file(&db_path).expect("file store");
        let period = test_period(
            "2026 H1",
            day(Month::March, 1),
            day(Month::June, 30),
            day(Month::February, 1),
        );
        store.create_period(&period).expect("insert")
    };

    let mut reopened = Persistence::new_with_file(&db_path).expect("reopen");
    let loaded = reopened.get_period(period_id).expect("load");
    assert_eq!(loaded.name, "2026 H1");

    std::fs::remove_dir_all(&dir).ok();
}
