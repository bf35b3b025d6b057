// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the reviewd evaluation backend.
//!
//! This crate translates between wire DTOs and the core aggregate. It owns
//! the error taxonomy the HTTP layer maps to status codes, and it is the
//! only layer that reads the clock.

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, change_phase, complete_period, create_period, delete_period,
    get_active_periods, get_period, list_periods, period_to_response, replace_grade_ranges,
    start_period, update_basic_info, update_evaluation_setup_deadline,
    update_peer_evaluation_deadline, update_performance_deadline, update_permission,
    update_schedule, update_self_evaluation_deadline, update_start_date,
};
pub use request_response::{
    ActivePeriodsResponse, CreatePeriodRequest, DeletePeriodResponse, GradeRangeDto,
    ListPeriodsResponse, PeriodResponse, ReplaceGradeRangesRequest, UpdateBasicInfoRequest,
    UpdateDateRequest, UpdatePermissionRequest, UpdateScheduleRequest,
};
