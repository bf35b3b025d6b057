// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ordering::ScheduleField;
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The period name is empty or invalid.
    InvalidPeriodName(String),
    /// A status string could not be parsed.
    InvalidStatus {
        /// The invalid status string.
        status: String,
    },
    /// A phase string could not be parsed.
    InvalidPhase {
        /// The invalid phase string.
        phase: String,
    },
    /// A permission flag name could not be parsed.
    InvalidPermissionFlag {
        /// The invalid flag name.
        flag: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a date as a string.
    DateFormatError {
        /// The formatting error message.
        error: String,
    },
    /// Two schedule dates violate the deadline-chain ordering.
    OrderViolation {
        /// The field that must come first.
        earlier: ScheduleField,
        /// The field that must come after.
        later: ScheduleField,
        /// The value of the earlier field.
        earlier_value: Date,
        /// The value of the later field.
        later_value: Date,
    },
    /// The end date precedes the start date.
    EndDateBeforeStart {
        /// The period start date.
        start_date: Date,
        /// The offending end date.
        end_date: Date,
    },
    /// The self-evaluation rate is outside the permitted percentage range.
    InvalidSelfEvaluationRate {
        /// The invalid rate value.
        rate: u16,
    },
    /// Another non-deleted period already uses this name.
    DuplicatePeriodName {
        /// The duplicate name.
        name: String,
    },
    /// The date range collides with another non-deleted period.
    OverlappingPeriod {
        /// The name of the colliding period.
        name: String,
        /// Start of the colliding period's range.
        start_date: Date,
        /// End of the colliding period's range.
        end_date: Date,
    },
    /// A status transition was attempted that the lifecycle forbids.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// A phase change was attempted that the sequence forbids.
    InvalidPhaseTransition {
        /// The current phase.
        from: String,
        /// Why the change is not permitted.
        reason: String,
    },
    /// A grade-range replacement carried no entries.
    EmptyGradeRanges,
    /// A grade range has out-of-bounds or inverted score bounds.
    InvalidGradeRange {
        /// The grade label.
        grade: String,
        /// The minimum score of the range.
        min_range: u8,
        /// The maximum score of the range.
        max_range: u8,
    },
    /// Two grade ranges carry the same grade label.
    DuplicateGradeRange {
        /// The duplicate grade label.
        grade: String,
    },
    /// Two grade ranges cover overlapping score intervals.
    GradeRangeOverlap {
        /// The first colliding grade label.
        first: String,
        /// The second colliding grade label.
        second: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPeriodName(msg) => write!(f, "Invalid period name: {msg}"),
            Self::InvalidStatus { status } => write!(f, "Invalid period status: '{status}'"),
            Self::InvalidPhase { phase } => write!(f, "Invalid evaluation phase: '{phase}'"),
            Self::InvalidPermissionFlag { flag } => {
                write!(f, "Invalid permission flag: '{flag}'")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateFormatError { error } => write!(f, "Failed to format date: {error}"),
            Self::OrderViolation {
                earlier,
                later,
                earlier_value,
                later_value,
            } => {
                write!(
                    f,
                    "Schedule order violation: {earlier} ({earlier_value}) must not come after {later} ({later_value})"
                )
            }
            Self::EndDateBeforeStart {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "End date {end_date} precedes start date {start_date}"
                )
            }
            Self::InvalidSelfEvaluationRate { rate } => {
                write!(
                    f,
                    "Invalid max self-evaluation rate: {rate}. Must be between 100 and 200"
                )
            }
            Self::DuplicatePeriodName { name } => {
                write!(f, "An evaluation period named '{name}' already exists")
            }
            Self::OverlappingPeriod {
                name,
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Date range overlaps evaluation period '{name}' ({start_date} to {end_date})"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from '{from}' to '{to}': {reason}")
            }
            Self::InvalidPhaseTransition { from, reason } => {
                write!(f, "Cannot change phase from '{from}': {reason}")
            }
            Self::EmptyGradeRanges => {
                write!(f, "Grade ranges must contain at least one entry")
            }
            Self::InvalidGradeRange {
                grade,
                min_range,
                max_range,
            } => {
                write!(
                    f,
                    "Invalid grade range '{grade}': [{min_range}, {max_range}] must satisfy 0 <= min < max <= 100"
                )
            }
            Self::DuplicateGradeRange { grade } => {
                write!(f, "Duplicate grade label '{grade}' in grade ranges")
            }
            Self::GradeRangeOverlap { first, second } => {
                write!(f, "Grade ranges '{first}' and '{second}' overlap")
            }
        }
    }
}

impl std::error::Error for DomainError {}
