// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The schedule value object and its PATCH companion.

use crate::ordering::ScheduleField;
use serde::{Deserialize, Serialize};
use time::Date;

/// The deadline chain of an evaluation period.
///
/// `start_date` and `peer_evaluation_deadline` are mandatory at the type
/// level; a persisted period can never carry a schedule without them. The
/// middle deadlines and the end date are optional and may be filled in later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// The day the period begins (UTC).
    pub start_date: Date,
    /// Optional explicit end of the period.
    pub end_date: Option<Date>,
    /// Deadline for the evaluation-setup phase.
    pub evaluation_setup_deadline: Option<Date>,
    /// Deadline for the performance phase.
    pub performance_deadline: Option<Date>,
    /// Deadline for the self-evaluation phase.
    pub self_evaluation_deadline: Option<Date>,
    /// Deadline for the peer-evaluation phase. May equal the
    /// self-evaluation deadline (same-day handoff is allowed).
    pub peer_evaluation_deadline: Date,
}

impl Schedule {
    /// Merges a partial patch onto this schedule, producing the candidate
    /// schedule that must be validated before any field is mutated.
    ///
    /// Absent patch fields leave the current value untouched. Clearing a
    /// deadline that is already set is not supported.
    #[must_use]
    pub const fn merged(&self, patch: &SchedulePatch) -> Self {
        Self {
            start_date: match patch.start_date {
                Some(date) => date,
                None => self.start_date,
            },
            end_date: match patch.end_date {
                Some(date) => Some(date),
                None => self.end_date,
            },
            evaluation_setup_deadline: match patch.evaluation_setup_deadline {
                Some(date) => Some(date),
                None => self.evaluation_setup_deadline,
            },
            performance_deadline: match patch.performance_deadline {
                Some(date) => Some(date),
                None => self.performance_deadline,
            },
            self_evaluation_deadline: match patch.self_evaluation_deadline {
                Some(date) => Some(date),
                None => self.self_evaluation_deadline,
            },
            peer_evaluation_deadline: match patch.peer_evaluation_deadline {
                Some(date) => date,
                None => self.peer_evaluation_deadline,
            },
        }
    }

    /// The end of this period's effective date range, used for overlap
    /// checks against sibling periods. Falls back to the peer-evaluation
    /// deadline when no explicit end date is set.
    #[must_use]
    pub fn effective_end_date(&self) -> Date {
        self.end_date.unwrap_or(self.peer_evaluation_deadline)
    }

    /// The five-date deadline chain in its fixed order, for the ordering
    /// validator.
    #[must_use]
    pub const fn chain_entries(&self) -> [(ScheduleField, Option<Date>); 5] {
        [
            (ScheduleField::StartDate, Some(self.start_date)),
            (
                ScheduleField::EvaluationSetupDeadline,
                self.evaluation_setup_deadline,
            ),
            (
                ScheduleField::PerformanceDeadline,
                self.performance_deadline,
            ),
            (
                ScheduleField::SelfEvaluationDeadline,
                self.self_evaluation_deadline,
            ),
            (
                ScheduleField::PeerEvaluationDeadline,
                Some(self.peer_evaluation_deadline),
            ),
        ]
    }
}

/// A partial schedule edit. Every field is optional; absent means untouched.
///
/// PATCH semantics are explicit here rather than reflective: the merge onto
/// the persisted snapshot happens in [`Schedule::merged`], and validation
/// always runs against the merged result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulePatch {
    /// New start date, if being edited.
    pub start_date: Option<Date>,
    /// New end date, if being edited.
    pub end_date: Option<Date>,
    /// New evaluation-setup deadline, if being edited.
    pub evaluation_setup_deadline: Option<Date>,
    /// New performance deadline, if being edited.
    pub performance_deadline: Option<Date>,
    /// New self-evaluation deadline, if being edited.
    pub self_evaluation_deadline: Option<Date>,
    /// New peer-evaluation deadline, if being edited.
    pub peer_evaluation_deadline: Option<Date>,
}

impl SchedulePatch {
    /// Returns true if the patch touches nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.evaluation_setup_deadline.is_none()
            && self.performance_deadline.is_none()
            && self.self_evaluation_deadline.is_none()
            && self.peer_evaluation_deadline.is_none()
    }

    /// A patch touching only the start date.
    #[must_use]
    pub fn start_date(date: Date) -> Self {
        Self {
            start_date: Some(date),
            ..Self::default()
        }
    }

    /// A patch touching only the evaluation-setup deadline.
    #[must_use]
    pub fn evaluation_setup_deadline(date: Date) -> Self {
        Self {
            evaluation_setup_deadline: Some(date),
            ..Self::default()
        }
    }

    /// A patch touching only the performance deadline.
    #[must_use]
    pub fn performance_deadline(date: Date) -> Self {
        Self {
            performance_deadline: Some(date),
            ..Self::default()
        }
    }

    /// A patch touching only the self-evaluation deadline.
    #[must_use]
    pub fn self_evaluation_deadline(date: Date) -> Self {
        Self {
            self_evaluation_deadline: Some(date),
            ..Self::default()
        }
    }

    /// A patch touching only the peer-evaluation deadline.
    #[must_use]
    pub fn peer_evaluation_deadline(date: Date) -> Self {
        Self {
            peer_evaluation_deadline: Some(date),
            ..Self::default()
        }
    }
}
