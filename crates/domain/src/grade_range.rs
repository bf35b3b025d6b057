// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Grade-range bands and their invariants.
//!
//! A period carries an ordered list of (grade, min, max) bands mapping
//! evaluation scores to letter grades. Updates are full-replace only; there
//! is no partial patch of individual entries.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One score band mapping a score interval to a grade label.
///
/// Bounds are inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRange {
    /// The grade label (e.g., "A", "B+").
    pub grade: String,
    /// The minimum score covered by this band.
    pub min_range: u8,
    /// The maximum score covered by this band.
    pub max_range: u8,
}

/// Validates a full grade-range replacement.
///
/// Rules:
/// - at least one entry
/// - each entry satisfies `0 <= min < max <= 100` and a non-empty grade
/// - grade labels are unique within the period
/// - no two bands overlap (bounds are inclusive, so sharing a boundary
///   value counts as overlap)
///
/// # Errors
///
/// Returns the first violated rule as a `DomainError`.
pub fn validate_grade_ranges(ranges: &[GradeRange]) -> Result<(), DomainError> {
    if ranges.is_empty() {
        return Err(DomainError::EmptyGradeRanges);
    }

    for range in ranges {
        if range.grade.trim().is_empty() || range.min_range >= range.max_range || range.max_range > 100
        {
            return Err(DomainError::InvalidGradeRange {
                grade: range.grade.clone(),
                min_range: range.min_range,
                max_range: range.max_range,
            });
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for range in ranges {
        if !seen.insert(range.grade.as_str()) {
            return Err(DomainError::DuplicateGradeRange {
                grade: range.grade.clone(),
            });
        }
    }

    for (i, a) in ranges.iter().enumerate() {
        for b in &ranges[i + 1..] {
            if a.min_range <= b.max_range && b.min_range <= a.max_range {
                return Err(DomainError::GradeRangeOverlap {
                    first: a.grade.clone(),
                    second: b.grade.clone(),
                });
            }
        }
    }

    Ok(())
}
