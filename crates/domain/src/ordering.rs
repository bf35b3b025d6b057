// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Deadline-chain ordering validation.
//!
//! The five schedule dates must satisfy a total order:
//!
//! ```text
//! start_date <= evaluation_setup_deadline <= performance_deadline
//!            <  self_evaluation_deadline  <= peer_evaluation_deadline
//! ```
//!
//! Equality is allowed between every adjacent pair except performance to
//! self-evaluation, which must be strictly increasing. The asymmetry is
//! intentional and encoded in [`DEADLINE_CHAIN_RULES`] rather than a single
//! global comparator. Partial schedules are permitted: comparisons where
//! either side is unset are skipped, and every non-null pair of the chain is
//! checked, not just adjacent pairs.

use crate::error::DomainError;
use crate::schedule::Schedule;
use serde::{Deserialize, Serialize};
use time::Date;

/// Names one of the schedule date fields, for ordering diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleField {
    /// The period start date.
    StartDate,
    /// The optional explicit end date.
    EndDate,
    /// The evaluation-setup deadline.
    EvaluationSetupDeadline,
    /// The performance deadline.
    PerformanceDeadline,
    /// The self-evaluation deadline.
    SelfEvaluationDeadline,
    /// The peer-evaluation deadline.
    PeerEvaluationDeadline,
}

impl ScheduleField {
    /// Returns the field name used in API payloads and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::EvaluationSetupDeadline => "evaluation_setup_deadline",
            Self::PerformanceDeadline => "performance_deadline",
            Self::SelfEvaluationDeadline => "self_evaluation_deadline",
            Self::PeerEvaluationDeadline => "peer_evaluation_deadline",
        }
    }
}

impl std::fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an adjacent pair of chain dates may relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// `earlier <= later`.
    AllowEqual,
    /// `earlier < later`.
    Strict,
}

/// The bound between each adjacent pair of the deadline chain.
///
/// Performance to self-evaluation is the only strict pair; a peer-evaluation
/// deadline on the same day as the self-evaluation deadline is allowed.
pub const DEADLINE_CHAIN_RULES: [(ScheduleField, ScheduleField, Bound); 4] = [
    (
        ScheduleField::StartDate,
        ScheduleField::EvaluationSetupDeadline,
        Bound::AllowEqual,
    ),
    (
        ScheduleField::EvaluationSetupDeadline,
        ScheduleField::PerformanceDeadline,
        Bound::AllowEqual,
    ),
    (
        ScheduleField::PerformanceDeadline,
        ScheduleField::SelfEvaluationDeadline,
        Bound::Strict,
    ),
    (
        ScheduleField::SelfEvaluationDeadline,
        ScheduleField::PeerEvaluationDeadline,
        Bound::AllowEqual,
    ),
];

/// Looks up the bound for a pair of chain fields.
///
/// Adjacent pairs use their entry in [`DEADLINE_CHAIN_RULES`]; non-adjacent
/// pairs (reachable when intermediate deadlines are unset) allow equality.
fn bound_for(earlier: ScheduleField, later: ScheduleField) -> Bound {
    for (rule_earlier, rule_later, bound) in DEADLINE_CHAIN_RULES {
        if rule_earlier == earlier && rule_later == later {
            return bound;
        }
    }
    Bound::AllowEqual
}

/// Validates that a sequence of (field, optional date) entries respects the
/// chain order. Entries must be supplied in chain order; unset entries are
/// skipped.
///
/// # Errors
///
/// Returns `DomainError::OrderViolation` naming the first offending pair.
pub fn validate_order(entries: &[(ScheduleField, Option<Date>)]) -> Result<(), DomainError> {
    for (i, (earlier_field, earlier_value)) in entries.iter().enumerate() {
        let Some(earlier_value) = earlier_value else {
            continue;
        };
        for (later_field, later_value) in &entries[i + 1..] {
            let Some(later_value) = later_value else {
                continue;
            };
            let violated = match bound_for(*earlier_field, *later_field) {
                Bound::AllowEqual => later_value < earlier_value,
                Bound::Strict => later_value <= earlier_value,
            };
            if violated {
                return Err(DomainError::OrderViolation {
                    earlier: *earlier_field,
                    later: *later_field,
                    earlier_value: *earlier_value,
                    later_value: *later_value,
                });
            }
        }
    }
    Ok(())
}

/// Validates the full schedule: the five-date chain plus the end-date rule.
///
/// # Errors
///
/// Returns `DomainError::OrderViolation` for a chain violation or
/// `DomainError::EndDateBeforeStart` when the end date precedes the start.
pub fn validate_schedule(schedule: &Schedule) -> Result<(), DomainError> {
    validate_order(&schedule.chain_entries())?;

    if let Some(end_date) = schedule.end_date
        && end_date < schedule.start_date
    {
        return Err(DomainError::EndDateBeforeStart {
            start_date: schedule.start_date,
            end_date,
        });
    }

    Ok(())
}
