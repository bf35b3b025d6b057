// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::{MAX_SELF_EVALUATION_RATE, MIN_SELF_EVALUATION_RATE};

/// Maximum accepted length of a period name, in characters.
const MAX_PERIOD_NAME_LEN: usize = 100;

/// Validates a period name's basic field constraints.
///
/// This checks shape only; uniqueness against sibling periods requires
/// context and is checked by the validation service in the core crate.
///
/// # Errors
///
/// Returns `DomainError::InvalidPeriodName` if the name is blank or too long.
pub fn validate_period_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidPeriodName(String::from(
            "Name cannot be empty",
        )));
    }

    if name.chars().count() > MAX_PERIOD_NAME_LEN {
        return Err(DomainError::InvalidPeriodName(format!(
            "Name cannot exceed {MAX_PERIOD_NAME_LEN} characters"
        )));
    }

    Ok(())
}

/// Validates that a self-evaluation rate is a percentage in `[100, 200]`.
///
/// # Errors
///
/// Returns `DomainError::InvalidSelfEvaluationRate` if out of range.
pub fn validate_self_evaluation_rate(rate: u16) -> Result<(), DomainError> {
    if !(MIN_SELF_EVALUATION_RATE..=MAX_SELF_EVALUATION_RATE).contains(&rate) {
        return Err(DomainError::InvalidSelfEvaluationRate { rate });
    }
    Ok(())
}
