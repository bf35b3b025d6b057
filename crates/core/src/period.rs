// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The evaluation-period aggregate.
//!
//! All mutation goes through the methods here. Each one validates the
//! candidate state first and only then writes fields, so a rejected call
//! leaves the entity exactly as it was. Schedule edits additionally
//! re-derive the (status, phase) pair from the merged schedule; reads never
//! derive.

use crate::error::CoreError;
use crate::validate::{
    SiblingPeriod, ensure_mutable, validate_basic_info, validate_create, validate_delete,
    validate_grade_range_replacement, validate_schedule_patch,
};
use reviewd_domain::{
    DomainError, EvaluationPhase, GradeRange, PeriodStatus, PermissionFlag, Schedule,
    SchedulePatch, derive_status_and_phase, validate_grade_ranges,
};
use time::Date;

/// A partial edit of a period's basic info. Absent fields are untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BasicInfoPatch {
    /// New period name, if being edited.
    pub name: Option<String>,
    /// New description, if being edited.
    pub description: Option<String>,
    /// New max self-evaluation rate, if being edited.
    pub max_self_evaluation_rate: Option<u16>,
}

/// An evaluation period with its schedule, lifecycle state, permission
/// flags, and grade ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationPeriod {
    /// Database identifier. Zero until the period is first persisted.
    pub period_id: i64,
    /// Unique display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Coarse lifecycle status.
    pub status: PeriodStatus,
    /// Current phase within the lifecycle.
    pub current_phase: EvaluationPhase,
    /// The deadline chain.
    pub schedule: Schedule,
    /// Upper bound for self-evaluation scores, in percent.
    pub max_self_evaluation_rate: u16,
    /// Whether evaluators may configure criteria.
    pub criteria_setting_enabled: bool,
    /// Whether employees may record self-evaluations.
    pub self_evaluation_setting_enabled: bool,
    /// Whether final evaluation entry is open.
    pub final_evaluation_setting_enabled: bool,
    /// The grade bands for this period.
    pub grade_ranges: Vec<GradeRange>,
    /// Who created the period.
    pub created_by: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// Who last modified the period.
    pub updated_by: String,
    /// RFC 3339 timestamp of the last modification.
    pub updated_at: String,
    /// RFC 3339 soft-deletion timestamp, if deleted.
    pub deleted_at: Option<String>,
}

impl EvaluationPeriod {
    /// Creates a new period, deriving its initial status and phase from
    /// `now` and the schedule. A period created with a start date in the
    /// past is born already in progress.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique period name
    /// * `description` - Optional description
    /// * `schedule` - The full deadline chain
    /// * `max_self_evaluation_rate` - Percentage cap in `[100, 200]`
    /// * `grade_ranges` - At least one valid, non-overlapping band
    /// * `siblings` - Every other non-deleted period, for uniqueness checks
    /// * `now` - The current UTC day
    /// * `actor` - Who is creating the period
    /// * `timestamp` - RFC 3339 creation time
    ///
    /// # Errors
    ///
    /// Returns the first violated creation rule as a `CoreError`.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        name: String,
        description: Option<String>,
        schedule: Schedule,
        max_self_evaluation_rate: u16,
        grade_ranges: Vec<GradeRange>,
        siblings: &[SiblingPeriod],
        now: Date,
        actor: &str,
        timestamp: &str,
    ) -> Result<Self, CoreError> {
        validate_create(
            &name,
            &schedule,
            max_self_evaluation_rate,
            &grade_ranges,
            siblings,
        )?;

        let (status, current_phase) = derive_status_and_phase(
            now,
            &schedule,
            PeriodStatus::default(),
            EvaluationPhase::default(),
        );

        Ok(Self {
            period_id: 0,
            name,
            description,
            status,
            current_phase,
            schedule,
            max_self_evaluation_rate,
            criteria_setting_enabled: false,
            self_evaluation_setting_enabled: false,
            final_evaluation_setting_enabled: false,
            grade_ranges,
            created_by: actor.to_string(),
            created_at: timestamp.to_string(),
            updated_by: actor.to_string(),
            updated_at: timestamp.to_string(),
            deleted_at: None,
        })
    }

    /// Returns true if the period has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies a basic-info edit (name, description, rate). The schedule and
    /// lifecycle state are untouched, so no derivation runs.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a `CoreError`.
    pub fn apply_basic_info(
        &mut self,
        patch: &BasicInfoPatch,
        siblings: &[SiblingPeriod],
        actor: &str,
        timestamp: &str,
    ) -> Result<(), CoreError> {
        ensure_mutable(self.status)?;

        let candidate_name = patch.name.as_deref().unwrap_or(&self.name);
        let candidate_rate = patch
            .max_self_evaluation_rate
            .unwrap_or(self.max_self_evaluation_rate);

        validate_basic_info(self.period_id, candidate_name, candidate_rate, siblings)?;

        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(rate) = patch.max_self_evaluation_rate {
            self.max_self_evaluation_rate = rate;
        }
        self.touch(actor, timestamp);
        Ok(())
    }

    /// Applies a schedule edit and re-derives status and phase from the
    /// merged schedule. This is the only path besides `start`/`complete`
    /// that moves lifecycle state, and the only one that can pull the phase
    /// backward.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a `CoreError`.
    pub fn apply_schedule_patch(
        &mut self,
        patch: &SchedulePatch,
        siblings: &[SiblingPeriod],
        now: Date,
        actor: &str,
        timestamp: &str,
    ) -> Result<(), CoreError> {
        ensure_mutable(self.status)?;

        let merged = validate_schedule_patch(self.period_id, &self.schedule, patch, siblings)?;

        let (status, phase) = derive_status_and_phase(now, &merged, self.status, self.current_phase);

        self.schedule = merged;
        self.status = status;
        self.current_phase = phase;
        self.touch(actor, timestamp);
        Ok(())
    }

    /// Starts the period explicitly, regardless of the start date. Only a
    /// `Waiting` period can be started; it moves to `InProgress` at
    /// `EvaluationSetup`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the period is `Waiting`.
    pub fn start(&mut self, actor: &str, timestamp: &str) -> Result<(), CoreError> {
        if self.status != PeriodStatus::Waiting {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: PeriodStatus::InProgress.to_string(),
                reason: String::from("only a waiting period can be started"),
            }
            .into());
        }

        self.status = PeriodStatus::InProgress;
        self.current_phase = EvaluationPhase::EvaluationSetup;
        self.touch(actor, timestamp);
        Ok(())
    }

    /// Completes the period explicitly. Only an `InProgress` period can be
    /// completed; it moves to `Completed` at `Closure` and becomes
    /// immutable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` unless the period is `InProgress`.
    pub fn complete(&mut self, actor: &str, timestamp: &str) -> Result<(), CoreError> {
        if self.status != PeriodStatus::InProgress {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: PeriodStatus::Completed.to_string(),
                reason: String::from("only an in-progress period can be completed"),
            }
            .into());
        }

        self.status = PeriodStatus::Completed;
        self.current_phase = EvaluationPhase::Closure;
        self.touch(actor, timestamp);
        Ok(())
    }

    /// Advances the phase one step manually, ahead of its deadline. The
    /// period must be in progress and not already at `Closure`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` if the period is not in progress,
    /// or `InvalidPhaseTransition` if the phase is already `Closure`.
    pub fn advance_phase(&mut self, actor: &str, timestamp: &str) -> Result<(), CoreError> {
        if self.status != PeriodStatus::InProgress {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: self.status.to_string(),
                reason: String::from("phase can only change while the period is in progress"),
            }
            .into());
        }

        let Some(next) = self.current_phase.next() else {
            return Err(DomainError::InvalidPhaseTransition {
                from: self.current_phase.to_string(),
                reason: String::from("the period is already in closure"),
            }
            .into());
        };

        self.current_phase = next;
        self.touch(actor, timestamp);
        Ok(())
    }

    /// Replaces the full grade-range list. Partial edits of individual
    /// bands are not supported.
    ///
    /// # Errors
    ///
    /// Returns the first violated grade-range rule as a `CoreError`.
    pub fn replace_grade_ranges(
        &mut self,
        ranges: Vec<GradeRange>,
        actor: &str,
        timestamp: &str,
    ) -> Result<(), CoreError> {
        ensure_mutable(self.status)?;
        validate_grade_range_replacement(&ranges)?;

        self.grade_ranges = ranges;
        self.touch(actor, timestamp);
        Ok(())
    }

    /// Sets one permission flag. The other two flags are untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` if the period is completed.
    pub fn set_permission(
        &mut self,
        flag: PermissionFlag,
        enabled: bool,
        actor: &str,
        timestamp: &str,
    ) -> Result<(), CoreError> {
        ensure_mutable(self.status)?;

        match flag {
            PermissionFlag::CriteriaSetting => self.criteria_setting_enabled = enabled,
            PermissionFlag::SelfEvaluationSetting => self.self_evaluation_setting_enabled = enabled,
            PermissionFlag::FinalEvaluationSetting => {
                self.final_evaluation_setting_enabled = enabled;
            }
        }
        self.touch(actor, timestamp);
        Ok(())
    }

    /// Soft-deletes the period. The row survives with `deleted_at` set and
    /// drops out of listings, uniqueness, and overlap checks.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` if the period is in progress.
    pub fn soft_delete(&mut self, actor: &str, timestamp: &str) -> Result<(), CoreError> {
        validate_delete(self.status)?;

        self.deleted_at = Some(timestamp.to_string());
        self.touch(actor, timestamp);
        Ok(())
    }

    /// Checks the stored grade ranges, used when rehydrating from storage.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if the stored bands violate any rule.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        validate_grade_ranges(&self.grade_ranges)?;
        Ok(())
    }

    fn touch(&mut self, actor: &str, timestamp: &str) {
        self.updated_by = actor.to_string();
        self.updated_at = timestamp.to_string();
    }
}
