// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Evaluation period lifecycle engine.
//!
//! This crate owns the [`EvaluationPeriod`] aggregate and the validation
//! service that gatekeeps every mutation. Mutations are validate-then-apply:
//! validation completes fully against the merged candidate state before any
//! field is touched, so a rejected mutation leaves the entity unchanged.
//!
//! Wall-clock time is always passed in by the caller; nothing here reads a
//! clock.

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

mod error;
mod period;
mod validate;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use period::{BasicInfoPatch, EvaluationPeriod};
pub use validate::{
    SiblingPeriod, ensure_mutable, validate_basic_info, validate_create, validate_delete,
    validate_grade_range_replacement, validate_schedule_patch,
};
