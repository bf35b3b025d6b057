// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use reviewd::CoreError;
use reviewd_domain::DomainError;
use reviewd_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Each variant maps to one HTTP status class at the server
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The request collides with existing data.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the collision.
        message: String,
    },
    /// The operation is not valid in the period's current lifecycle state.
    InvalidState {
        /// A human-readable description of why the state forbids it.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::InvalidState { message } => {
                write!(f, "Invalid state: {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidPeriodName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown status: '{status}'"),
        },
        DomainError::InvalidPhase { phase } => ApiError::InvalidInput {
            field: String::from("phase"),
            message: format!("Unknown phase: '{phase}'"),
        },
        DomainError::InvalidPermissionFlag { flag } => ApiError::InvalidInput {
            field: String::from("flag"),
            message: format!("Unknown permission flag: '{flag}'"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateFormatError { error } => ApiError::Internal {
            message: format!("Failed to format date: {error}"),
        },
        DomainError::OrderViolation {
            earlier,
            later,
            earlier_value,
            later_value,
        } => ApiError::InvalidInput {
            field: later.to_string(),
            message: format!(
                "{earlier} ({earlier_value}) must not come after {later} ({later_value})"
            ),
        },
        DomainError::EndDateBeforeStart {
            start_date,
            end_date,
        } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!("End date {end_date} precedes start date {start_date}"),
        },
        DomainError::InvalidSelfEvaluationRate { rate } => ApiError::InvalidInput {
            field: String::from("max_self_evaluation_rate"),
            message: format!("Rate {rate} must be between 100 and 200"),
        },
        DomainError::DuplicatePeriodName { name } => ApiError::Conflict {
            rule: String::from("unique_period_name"),
            message: format!("An evaluation period named '{name}' already exists"),
        },
        DomainError::OverlappingPeriod {
            name,
            start_date,
            end_date,
        } => ApiError::Conflict {
            rule: String::from("disjoint_period_ranges"),
            message: format!(
                "Date range overlaps evaluation period '{name}' ({start_date} to {end_date})"
            ),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::InvalidState {
            message: format!("Cannot transition from '{from}' to '{to}': {reason}"),
        },
        DomainError::InvalidPhaseTransition { from, reason } => ApiError::InvalidState {
            message: format!("Cannot change phase from '{from}': {reason}"),
        },
        DomainError::EmptyGradeRanges => ApiError::InvalidInput {
            field: String::from("grade_ranges"),
            message: String::from("Grade ranges must contain at least one entry"),
        },
        DomainError::InvalidGradeRange {
            grade,
            min_range,
            max_range,
        } => ApiError::InvalidInput {
            field: String::from("grade_ranges"),
            message: format!(
                "Invalid grade range '{grade}': [{min_range}, {max_range}] must satisfy 0 <= min < max <= 100"
            ),
        },
        DomainError::DuplicateGradeRange { grade } => ApiError::InvalidInput {
            field: String::from("grade_ranges"),
            message: format!("Duplicate grade label '{grade}'"),
        },
        DomainError::GradeRangeOverlap { first, second } => ApiError::InvalidInput {
            field: String::from("grade_ranges"),
            message: format!("Grade ranges '{first}' and '{second}' overlap"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(message) => ApiError::Internal { message },
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::PeriodNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Evaluation period"),
            message: format!("Evaluation period {id} does not exist"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}
