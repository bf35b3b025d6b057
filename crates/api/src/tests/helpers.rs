// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{CreatePeriodRequest, GradeRangeDto};
use reviewd_persistence::Persistence;

pub const TEST_ACTOR: &str = "hr-admin";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory persistence")
}

pub fn default_grade_range_dtos() -> Vec<GradeRangeDto> {
    vec![
        GradeRangeDto {
            grade: String::from("A"),
            min_range: 80,
            max_range: 100,
        },
        GradeRangeDto {
            grade: String::from("B"),
            min_range: 0,
            max_range: 79,
        },
    ]
}

/// A request for a period far in the future, so it is created as `waiting`
/// no matter when the tests run.
pub fn future_period_request(name: &str) -> CreatePeriodRequest {
    CreatePeriodRequest {
        name: name.to_string(),
        description: Some(String::from("created by tests")),
        start_date: String::from("2900-01-01"),
        end_date: None,
        evaluation_setup_deadline: Some(String::from("2900-02-01")),
        performance_deadline: Some(String::from("2900-03-01")),
        self_evaluation_deadline: Some(String::from("2900-04-01")),
        peer_evaluation_deadline: String::from("2900-05-01"),
        max_self_evaluation_rate: None,
        grade_ranges: default_grade_range_dtos(),
    }
}

/// A request for a period whose dates are all long past, so it is created
/// already in progress at closure.
pub fn past_period_request(name: &str) -> CreatePeriodRequest {
    CreatePeriodRequest {
        name: name.to_string(),
        description: None,
        start_date: String::from("2000-01-01"),
        end_date: None,
        evaluation_setup_deadline: Some(String::from("2000-02-01")),
        performance_deadline: Some(String::from("2000-03-01")),
        self_evaluation_deadline: Some(String::from("2000-04-01")),
        peer_evaluation_deadline: String::from("2000-05-01"),
        max_self_evaluation_rate: Some(150),
        grade_ranges: default_grade_range_dtos(),
    }
}
