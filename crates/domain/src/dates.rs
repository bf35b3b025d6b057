// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Strict schedule date parsing and formatting.
//!
//! All schedule fields are UTC calendar days. Inputs are either a bare
//! `YYYY-MM-DD` day (validated against the real calendar, so `2024-02-30`
//! and `2024-13-01` are rejected) or an RFC 3339 timestamp, which is
//! normalized to the UTC day it falls on.

use crate::error::DomainError;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const DAY_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses a schedule date from its string form.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is neither a valid
/// calendar day nor a valid RFC 3339 timestamp.
pub fn parse_schedule_date(raw: &str) -> Result<Date, DomainError> {
    match Date::parse(raw, DAY_FORMAT) {
        Ok(date) => Ok(date),
        Err(day_error) => {
            // Fall back to a full timestamp, normalized to the UTC day.
            if let Ok(datetime) = OffsetDateTime::parse(raw, &Rfc3339) {
                return Ok(datetime.to_offset(UtcOffset::UTC).date());
            }
            Err(DomainError::DateParseError {
                date_string: raw.to_string(),
                error: day_error.to_string(),
            })
        }
    }
}

/// Formats a schedule date as `YYYY-MM-DD` for persistence and the API.
///
/// # Errors
///
/// Returns `DomainError::DateFormatError` if formatting fails.
pub fn format_schedule_date(date: Date) -> Result<String, DomainError> {
    date.format(DAY_FORMAT)
        .map_err(|e| DomainError::DateFormatError {
            error: e.to_string(),
        })
}
