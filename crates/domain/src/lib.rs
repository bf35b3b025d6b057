// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rule validation for the reviewd evaluation backend.
//!
//! This crate is pure: no clock access, no I/O, no persistence. Every
//! function here is deterministic over its inputs so that the lifecycle
//! logic can be tested with fixed dates.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dates;
mod error;
mod grade_range;
mod ordering;
mod phase;
mod schedule;
mod types;
mod validation;

pub use dates::{format_schedule_date, parse_schedule_date};
pub use error::DomainError;
pub use grade_range::{GradeRange, validate_grade_ranges};
pub use ordering::{Bound, DEADLINE_CHAIN_RULES, ScheduleField, validate_order, validate_schedule};
pub use phase::derive_status_and_phase;
pub use schedule::{Schedule, SchedulePatch};
pub use types::{EvaluationPhase, PeriodStatus, PermissionFlag};
pub use validation::{validate_period_name, validate_self_evaluation_rate};

/// Lower bound (inclusive) for `max_self_evaluation_rate`, in percent.
pub const MIN_SELF_EVALUATION_RATE: u16 = 100;

/// Upper bound (inclusive) for `max_self_evaluation_rate`, in percent.
pub const MAX_SELF_EVALUATION_RATE: u16 = 200;

/// Default `max_self_evaluation_rate` applied when a create request omits it.
pub const DEFAULT_SELF_EVALUATION_RATE: u16 = 120;
