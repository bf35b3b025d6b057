// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EvaluationPeriod, SiblingPeriod};
use reviewd_domain::{GradeRange, Schedule};
use time::{Date, Month};

pub const TEST_ACTOR: &str = "hr-admin";
pub const TEST_TIMESTAMP: &str = "2026-03-01T09:00:00Z";

pub fn march(day: u8) -> Date {
    Date::from_calendar_date(2026, Month::March, day).unwrap()
}

pub fn full_schedule() -> Schedule {
    Schedule {
        start_date: march(1),
        end_date: None,
        evaluation_setup_deadline: Some(march(5)),
        performance_deadline: Some(march(10)),
        self_evaluation_deadline: Some(march(15)),
        peer_evaluation_deadline: march(20),
    }
}

pub fn default_grade_ranges() -> Vec<GradeRange> {
    vec![
        GradeRange {
            grade: String::from("A"),
            min_range: 90,
            max_range: 100,
        },
        GradeRange {
            grade: String::from("B"),
            min_range: 70,
            max_range: 89,
        },
        GradeRange {
            grade: String::from("C"),
            min_range: 0,
            max_range: 69,
        },
    ]
}

/// Creates a period named "2026 H1" running March 1-20, evaluated as of
/// `now`.
pub fn create_test_period(now: Date) -> EvaluationPeriod {
    EvaluationPeriod::create(
        String::from("2026 H1"),
        Some(String::from("First-half review")),
        full_schedule(),
        120,
        default_grade_ranges(),
        &[],
        now,
        TEST_ACTOR,
        TEST_TIMESTAMP,
    )
    .expect("test period should validate")
}

pub fn sibling(period_id: i64, name: &str, start: Date, end: Date) -> SiblingPeriod {
    SiblingPeriod {
        period_id,
        name: name.to_string(),
        start_date: start,
        end_date: end,
    }
}
