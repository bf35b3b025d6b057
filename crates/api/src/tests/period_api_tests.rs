// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler-level tests against in-memory persistence.

use crate::error::ApiError;
use crate::handlers::{
    change_phase, complete_period, create_period, delete_period, get_active_periods, get_period,
    list_periods, replace_grade_ranges, start_period, update_basic_info,
    update_peer_evaluation_deadline, update_permission, update_schedule,
};
use crate::request_response::{
    GradeRangeDto, ReplaceGradeRangesRequest, UpdateBasicInfoRequest, UpdateDateRequest,
    UpdatePermissionRequest, UpdateScheduleRequest,
};

use super::helpers::{
    TEST_ACTOR, create_test_persistence, future_period_request, past_period_request,
};

// ============================================================================
// Creation Tests
// ============================================================================

#[test]
fn test_create_period_returns_waiting_future_period() {
    let mut persistence = create_test_persistence();

    let response = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create should succeed");

    assert!(response.period_id > 0);
    assert_eq!(response.status, "waiting");
    assert_eq!(response.current_phase, "waiting");
    assert_eq!(response.max_self_evaluation_rate, 120);
    assert_eq!(response.created_by, TEST_ACTOR);
    assert_eq!(response.grade_ranges.len(), 2);
}

#[test]
fn test_create_period_with_past_dates_is_in_progress() {
    let mut persistence = create_test_persistence();

    let response = create_period(&mut persistence, &past_period_request("2000 H1"), TEST_ACTOR)
        .expect("create should succeed");

    assert_eq!(response.status, "in_progress");
    assert_eq!(response.current_phase, "closure");
    assert_eq!(response.max_self_evaluation_rate, 150);
}

#[test]
fn test_create_rejects_duplicate_name() {
    let mut persistence = create_test_persistence();
    create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("first create");

    let mut second = future_period_request("2900 H1");
    second.start_date = String::from("2901-01-01");
    second.evaluation_setup_deadline = Some(String::from("2901-02-01"));
    second.performance_deadline = Some(String::from("2901-03-01"));
    second.self_evaluation_deadline = Some(String::from("2901-04-01"));
    second.peer_evaluation_deadline = String::from("2901-05-01");

    let err = create_period(&mut persistence, &second, TEST_ACTOR).unwrap_err();
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "unique_period_name"));
}

#[test]
fn test_create_rejects_overlapping_range() {
    let mut persistence = create_test_persistence();
    create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("first create");

    let mut second = future_period_request("2900 H2");
    // Starts inside the first period's range.
    second.start_date = String::from("2900-04-15");
    second.evaluation_setup_deadline = Some(String::from("2900-05-15"));
    second.performance_deadline = Some(String::from("2900-06-15"));
    second.self_evaluation_deadline = Some(String::from("2900-07-15"));
    second.peer_evaluation_deadline = String::from("2900-08-15");

    let err = create_period(&mut persistence, &second, TEST_ACTOR).unwrap_err();
    assert!(matches!(err, ApiError::Conflict { ref rule, .. } if rule == "disjoint_period_ranges"));
}

#[test]
fn test_create_rejects_unparseable_date() {
    let mut persistence = create_test_persistence();
    let mut request = future_period_request("2900 H1");
    request.start_date = String::from("2900-02-30");

    let err = create_period(&mut persistence, &request, TEST_ACTOR).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "start_date"));
}

#[test]
fn test_create_accepts_rfc3339_dates() {
    let mut persistence = create_test_persistence();
    let mut request = future_period_request("2900 H1");
    request.start_date = String::from("2900-01-01T09:30:00+09:00");

    let response =
        create_period(&mut persistence, &request, TEST_ACTOR).expect("create should succeed");
    assert_eq!(response.start_date, "2900-01-01");
}

// ============================================================================
// Query Tests
// ============================================================================

#[test]
fn test_get_missing_period_is_not_found() {
    let mut persistence = create_test_persistence();

    let err = get_period(&mut persistence, 42).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_list_returns_periods_in_start_order() {
    let mut persistence = create_test_persistence();

    let mut later = future_period_request("2901 H1");
    later.start_date = String::from("2901-01-01");
    later.evaluation_setup_deadline = Some(String::from("2901-02-01"));
    later.performance_deadline = Some(String::from("2901-03-01"));
    later.self_evaluation_deadline = Some(String::from("2901-04-01"));
    later.peer_evaluation_deadline = String::from("2901-05-01");
    create_period(&mut persistence, &later, TEST_ACTOR).expect("create later");
    create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create earlier");

    let response = list_periods(&mut persistence, 1, 50).expect("list");
    let names: Vec<&str> = response.periods.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["2900 H1", "2901 H1"]);
    assert_eq!(response.total, 2);
}

#[test]
fn test_list_pages_and_clamps_inputs() {
    let mut persistence = create_test_persistence();

    let mut later = future_period_request("2901 H1");
    later.start_date = String::from("2901-01-01");
    later.evaluation_setup_deadline = Some(String::from("2901-02-01"));
    later.performance_deadline = Some(String::from("2901-03-01"));
    later.self_evaluation_deadline = Some(String::from("2901-04-01"));
    later.peer_evaluation_deadline = String::from("2901-05-01");
    create_period(&mut persistence, &later, TEST_ACTOR).expect("create later");
    create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create earlier");

    let response = list_periods(&mut persistence, 2, 1).expect("second page");
    assert_eq!(response.periods.len(), 1);
    assert_eq!(response.periods[0].name, "2901 H1");
    assert_eq!(response.total, 2);

    // Page zero and limit zero are clamped, not rejected.
    let response = list_periods(&mut persistence, 0, 0).expect("clamped");
    assert_eq!(response.page, 1);
    assert_eq!(response.limit, 1);
    assert_eq!(response.periods.len(), 1);

    let response = list_periods(&mut persistence, 3, 50).expect("past the end");
    assert!(response.periods.is_empty());
    assert_eq!(response.total, 2);
}

#[test]
fn test_active_periods_reflect_stored_status() {
    let mut persistence = create_test_persistence();

    create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create waiting");
    let response = get_active_periods(&mut persistence).expect("query");
    assert!(response.periods.is_empty());

    create_period(&mut persistence, &past_period_request("2000 H1"), TEST_ACTOR)
        .expect("create running");
    let response = get_active_periods(&mut persistence).expect("query");
    assert_eq!(response.periods.len(), 1);
    assert_eq!(response.periods[0].name, "2000 H1");
}

// ============================================================================
// Basic Info Tests
// ============================================================================

#[test]
fn test_update_basic_info_merges_partial_patch() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let request = UpdateBasicInfoRequest {
        name: Some(String::from("2900 First Half")),
        description: None,
        max_self_evaluation_rate: None,
    };
    let updated = update_basic_info(&mut persistence, created.period_id, &request, "hr-lead")
        .expect("update");

    assert_eq!(updated.name, "2900 First Half");
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.max_self_evaluation_rate, 120);
    assert_eq!(updated.updated_by, "hr-lead");
}

#[test]
fn test_update_basic_info_rejects_bad_rate() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let request = UpdateBasicInfoRequest {
        name: None,
        description: None,
        max_self_evaluation_rate: Some(99),
    };
    let err = update_basic_info(&mut persistence, created.period_id, &request, TEST_ACTOR)
        .unwrap_err();
    assert!(
        matches!(err, ApiError::InvalidInput { ref field, .. } if field == "max_self_evaluation_rate")
    );
}

// ============================================================================
// Schedule Tests
// ============================================================================

#[test]
fn test_update_schedule_rejects_chain_violation() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    // Performance deadline pushed past the self-evaluation deadline.
    let request = UpdateScheduleRequest {
        performance_deadline: Some(String::from("2900-04-15")),
        ..UpdateScheduleRequest::default()
    };
    let err =
        update_schedule(&mut persistence, created.period_id, &request, TEST_ACTOR).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));

    // The stored period is unchanged.
    let loaded = get_period(&mut persistence, created.period_id).expect("get");
    assert_eq!(
        loaded.performance_deadline.as_deref(),
        Some("2900-03-01")
    );
}

#[test]
fn test_single_date_endpoint_updates_peer_deadline() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let request = UpdateDateRequest {
        date: String::from("2900-06-01"),
    };
    let updated = update_peer_evaluation_deadline(
        &mut persistence,
        created.period_id,
        &request,
        TEST_ACTOR,
    )
    .expect("update");

    assert_eq!(updated.peer_evaluation_deadline, "2900-06-01");
    // Untouched fields survive the patch.
    assert_eq!(
        updated.self_evaluation_deadline.as_deref(),
        Some("2900-04-01")
    );
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_start_then_complete_then_immutable() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let started =
        start_period(&mut persistence, created.period_id, TEST_ACTOR).expect("start");
    assert_eq!(started.status, "in_progress");
    assert_eq!(started.current_phase, "evaluation_setup");

    let completed =
        complete_period(&mut persistence, created.period_id, TEST_ACTOR).expect("complete");
    assert_eq!(completed.status, "completed");
    assert_eq!(completed.current_phase, "closure");

    let request = UpdateBasicInfoRequest {
        name: Some(String::from("renamed")),
        description: None,
        max_self_evaluation_rate: None,
    };
    let err = update_basic_info(&mut persistence, created.period_id, &request, TEST_ACTOR)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

#[test]
fn test_change_phase_advances_one_step() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");
    start_period(&mut persistence, created.period_id, TEST_ACTOR).expect("start");

    let response =
        change_phase(&mut persistence, created.period_id, TEST_ACTOR).expect("advance");
    assert_eq!(response.current_phase, "performance");
}

#[test]
fn test_change_phase_rejected_while_waiting() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let err = change_phase(&mut persistence, created.period_id, TEST_ACTOR).unwrap_err();
    assert!(matches!(err, ApiError::InvalidState { .. }));
}

// ============================================================================
// Grade Range Tests
// ============================================================================

#[test]
fn test_replace_grade_ranges_rejects_overlap() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let request = ReplaceGradeRangesRequest {
        grade_ranges: vec![
            GradeRangeDto {
                grade: String::from("A"),
                min_range: 70,
                max_range: 100,
            },
            GradeRangeDto {
                grade: String::from("B"),
                min_range: 0,
                max_range: 70,
            },
        ],
    };
    let err = replace_grade_ranges(&mut persistence, created.period_id, &request, TEST_ACTOR)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "grade_ranges"));
}

#[test]
fn test_replace_grade_ranges_round_trips() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let request = ReplaceGradeRangesRequest {
        grade_ranges: vec![GradeRangeDto {
            grade: String::from("S"),
            min_range: 0,
            max_range: 100,
        }],
    };
    let updated = replace_grade_ranges(&mut persistence, created.period_id, &request, TEST_ACTOR)
        .expect("replace");
    assert_eq!(updated.grade_ranges, request.grade_ranges);
}

// ============================================================================
// Permission Tests
// ============================================================================

#[test]
fn test_update_permission_flips_one_flag() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let request = UpdatePermissionRequest {
        flag: String::from("self_evaluation_setting"),
        enabled: true,
    };
    let updated = update_permission(&mut persistence, created.period_id, &request, TEST_ACTOR)
        .expect("update");

    assert!(updated.self_evaluation_setting_enabled);
    assert!(!updated.criteria_setting_enabled);
    assert!(!updated.final_evaluation_setting_enabled);
}

#[test]
fn test_update_permission_rejects_unknown_flag() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let request = UpdatePermissionRequest {
        flag: String::from("bonus_setting"),
        enabled: true,
    };
    let err = update_permission(&mut persistence, created.period_id, &request, TEST_ACTOR)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "flag"));
}

// ============================================================================
// Delete Tests
// ============================================================================

#[test]
fn test_delete_waiting_period_then_gone() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");

    let response =
        delete_period(&mut persistence, created.period_id, TEST_ACTOR).expect("delete");
    assert_eq!(response.period_id, created.period_id);

    let err = get_period(&mut persistence, created.period_id).unwrap_err();
    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_delete_frees_name_and_range_for_reuse() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
        .expect("create");
    delete_period(&mut persistence, created.period_id, TEST_ACTOR).expect("delete");

    // Same name, same dates: legal again once the original is deleted.
    let recreated =
        create_period(&mut persistence, &future_period_request("2900 H1"), TEST_ACTOR)
            .expect("recreate");
    assert_ne!(recreated.period_id, created.period_id);
}

#[test]
fn test_delete_in_progress_period_rejected() {
    let mut persistence = create_test_persistence();
    let created = create_period(&mut persistence, &past_period_request("2000 H1"), TEST_ACTOR)
        .expect("create");

    let err = delete_period(&mut persistence, created.period_id, TEST_ACTOR).unwrap_err();
    assert!(matches!(err, ApiError::InvalidState { .. }));
}
