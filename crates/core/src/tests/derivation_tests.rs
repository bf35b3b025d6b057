// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for write-time derivation through schedule edits on the aggregate.

use reviewd_domain::{EvaluationPhase, PeriodStatus, SchedulePatch};

use super::helpers::{TEST_ACTOR, TEST_TIMESTAMP, create_test_period, march};

#[test]
fn test_schedule_edit_rederives_phase_forward() {
    // Created on March 2, so the setup deadline (March 5) has not passed.
    let mut period = create_test_period(march(2));
    assert_eq!(period.current_phase, EvaluationPhase::EvaluationSetup);

    // Editing on March 12 re-derives against the new clock: setup and
    // performance deadlines are both past.
    let patch = SchedulePatch::peer_evaluation_deadline(march(22));
    period
        .apply_schedule_patch(&patch, &[], march(12), TEST_ACTOR, TEST_TIMESTAMP)
        .expect("patch should apply");

    assert_eq!(period.status, PeriodStatus::InProgress);
    assert_eq!(period.current_phase, EvaluationPhase::SelfEvaluation);
}

#[test]
fn test_extending_deadlines_pulls_phase_backward() {
    let mut period = create_test_period(march(12));
    assert_eq!(period.current_phase, EvaluationPhase::SelfEvaluation);

    // Pushing every remaining deadline into the future reopens earlier
    // phases.
    let patch = SchedulePatch {
        evaluation_setup_deadline: Some(march(18)),
        performance_deadline: Some(march(20)),
        self_evaluation_deadline: Some(march(24)),
        peer_evaluation_deadline: Some(march(28)),
        ..SchedulePatch::default()
    };
    period
        .apply_schedule_patch(&patch, &[], march(12), TEST_ACTOR, TEST_TIMESTAMP)
        .expect("patch should apply");

    assert_eq!(period.status, PeriodStatus::InProgress);
    assert_eq!(period.current_phase, EvaluationPhase::EvaluationSetup);
}

#[test]
fn test_moving_start_into_future_returns_to_waiting() {
    let mut period = create_test_period(march(2));
    assert_eq!(period.status, PeriodStatus::InProgress);

    let patch = SchedulePatch {
        start_date: Some(march(10)),
        evaluation_setup_deadline: Some(march(12)),
        performance_deadline: Some(march(14)),
        self_evaluation_deadline: Some(march(16)),
        peer_evaluation_deadline: Some(march(22)),
        ..SchedulePatch::default()
    };
    period
        .apply_schedule_patch(&patch, &[], march(2), TEST_ACTOR, TEST_TIMESTAMP)
        .expect("patch should apply");

    assert_eq!(period.status, PeriodStatus::Waiting);
    assert_eq!(period.current_phase, EvaluationPhase::Waiting);
}

#[test]
fn test_moving_start_into_past_starts_waiting_period() {
    // Shift the whole schedule into the future so the period is waiting.
    let mut period = create_test_period(march(2));
    let future = SchedulePatch {
        start_date: Some(march(10)),
        evaluation_setup_deadline: Some(march(12)),
        performance_deadline: Some(march(14)),
        self_evaluation_deadline: Some(march(16)),
        peer_evaluation_deadline: Some(march(22)),
        ..SchedulePatch::default()
    };
    period
        .apply_schedule_patch(&future, &[], march(2), TEST_ACTOR, TEST_TIMESTAMP)
        .expect("future shift should apply");
    assert_eq!(period.status, PeriodStatus::Waiting);
    assert_eq!(period.current_phase, EvaluationPhase::Waiting);

    // A single start-date edit back into the past starts it at setup.
    period
        .apply_schedule_patch(
            &SchedulePatch::start_date(march(1)),
            &[],
            march(2),
            TEST_ACTOR,
            TEST_TIMESTAMP,
        )
        .expect("start-date edit should apply");

    assert_eq!(period.status, PeriodStatus::InProgress);
    assert_eq!(period.current_phase, EvaluationPhase::EvaluationSetup);
}

#[test]
fn test_rejected_patch_leaves_lifecycle_state_alone() {
    let mut period = create_test_period(march(12));
    let snapshot = period.clone();

    // Violates the chain: performance after self-evaluation.
    let patch = SchedulePatch::performance_deadline(march(16));
    assert!(
        period
            .apply_schedule_patch(&patch, &[], march(12), TEST_ACTOR, TEST_TIMESTAMP)
            .is_err()
    );

    assert_eq!(period, snapshot);
}

#[test]
fn test_empty_patch_still_rederives_against_now() {
    // Created on March 2 at EvaluationSetup; the stored phase goes stale as
    // time passes because reads never derive.
    let mut period = create_test_period(march(2));
    assert_eq!(period.current_phase, EvaluationPhase::EvaluationSetup);

    // Any schedule write, even an empty one, refreshes the pair.
    period
        .apply_schedule_patch(
            &SchedulePatch::default(),
            &[],
            march(21),
            TEST_ACTOR,
            TEST_TIMESTAMP,
        )
        .expect("empty patch should apply");

    assert_eq!(period.current_phase, EvaluationPhase::Closure);
    assert_eq!(period.status, PeriodStatus::InProgress);
}

#[test]
fn test_repeated_identical_patch_is_idempotent() {
    let mut period = create_test_period(march(12));
    let patch = SchedulePatch::peer_evaluation_deadline(march(22));

    period
        .apply_schedule_patch(&patch, &[], march(12), TEST_ACTOR, TEST_TIMESTAMP)
        .expect("first apply should succeed");
    let after_first = period.clone();

    period
        .apply_schedule_patch(&patch, &[], march(12), TEST_ACTOR, TEST_TIMESTAMP)
        .expect("second apply should succeed");

    assert_eq!(period.status, after_first.status);
    assert_eq!(period.current_phase, after_first.current_phase);
    assert_eq!(period.schedule, after_first.schedule);
}
