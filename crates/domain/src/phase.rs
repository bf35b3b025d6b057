// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status and phase derivation for evaluation periods.
//!
//! Derivation is idempotent, not incremental: it recomputes the pair from
//! absolute dates on every call, so calling it twice with the same inputs
//! yields the same output, and a later `now` can only hold or advance the
//! phase. An explicit schedule edit that pushes deadlines back into the
//! future can pull the phase backward; that is intentional and distinct
//! from natural time advance.
//!
//! `now` is always threaded in by the caller. This module never reads a
//! clock, so tests supply fixed days.

use crate::schedule::Schedule;
use crate::types::{EvaluationPhase, PeriodStatus};
use time::Date;

/// Derives the (status, phase) pair for a period from wall-clock time and
/// its schedule.
///
/// # Arguments
///
/// * `now` - The current UTC day
/// * `schedule` - The period's schedule after any pending edit is merged
/// * `prior_status` - The status before derivation
/// * `prior_phase` - The phase before derivation
///
/// # Algorithm
///
/// 1. `Completed` is terminal: the prior pair is returned unchanged.
/// 2. A start date in the future means `(Waiting, Waiting)`.
/// 3. Otherwise the period is `InProgress`. The phase starts at
///    `EvaluationSetup` and advances once for each deadline, walked in fixed
///    order, that is set and already past; the walk stops at the first unset
///    or still-pending deadline. All four past means `Closure`.
#[must_use]
pub fn derive_status_and_phase(
    now: Date,
    schedule: &Schedule,
    prior_status: PeriodStatus,
    prior_phase: EvaluationPhase,
) -> (PeriodStatus, EvaluationPhase) {
    if prior_status.is_terminal() {
        return (prior_status, prior_phase);
    }

    if schedule.start_date > now {
        return (PeriodStatus::Waiting, EvaluationPhase::Waiting);
    }

    let deadlines: [Option<Date>; 4] = [
        schedule.evaluation_setup_deadline,
        schedule.performance_deadline,
        schedule.self_evaluation_deadline,
        Some(schedule.peer_evaluation_deadline),
    ];

    let mut phase = EvaluationPhase::EvaluationSetup;
    for deadline in deadlines {
        match deadline {
            Some(deadline) if deadline < now => {
                // A deadline counts as past only once its day is over.
                if let Some(next) = phase.next() {
                    phase = next;
                }
            }
            _ => break,
        }
    }

    (PeriodStatus::InProgress, phase)
}
