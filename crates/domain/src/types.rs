// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse lifecycle status of an evaluation period.
///
/// Status never advances on its own; it is re-derived from wall-clock time
/// and the schedule on every write, or moved explicitly by `start`/`complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Created but the start date has not been reached.
    #[default]
    Waiting,
    /// The period is running; phases advance as deadlines pass.
    InProgress,
    /// Explicitly completed. Terminal: no further mutation is permitted.
    Completed,
}

impl PeriodStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (no mutation may follow).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl FromStr for PeriodStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The ordered stages an evaluation period passes through.
///
/// The total order is the declaration order (`Ord` derives from it); there is
/// no other comparison path. Automatic derivation only ever walks forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationPhase {
    /// The period has not started.
    #[default]
    Waiting,
    /// Evaluation criteria are being set up.
    EvaluationSetup,
    /// The performance window is open.
    Performance,
    /// Employees record self-evaluations.
    SelfEvaluation,
    /// Peer and downward evaluations are recorded.
    PeerEvaluation,
    /// All deadlines have passed; the period is wrapping up.
    Closure,
}

impl EvaluationPhase {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::EvaluationSetup => "evaluation_setup",
            Self::Performance => "performance",
            Self::SelfEvaluation => "self_evaluation",
            Self::PeerEvaluation => "peer_evaluation",
            Self::Closure => "closure",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "evaluation_setup" => Ok(Self::EvaluationSetup),
            "performance" => Ok(Self::Performance),
            "self_evaluation" => Ok(Self::SelfEvaluation),
            "peer_evaluation" => Ok(Self::PeerEvaluation),
            "closure" => Ok(Self::Closure),
            _ => Err(DomainError::InvalidPhase {
                phase: s.to_string(),
            }),
        }
    }

    /// Returns the next phase in the fixed sequence, or `None` at `Closure`.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Waiting => Some(Self::EvaluationSetup),
            Self::EvaluationSetup => Some(Self::Performance),
            Self::Performance => Some(Self::SelfEvaluation),
            Self::SelfEvaluation => Some(Self::PeerEvaluation),
            Self::PeerEvaluation => Some(Self::Closure),
            Self::Closure => None,
        }
    }
}

impl FromStr for EvaluationPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for EvaluationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selects one of the three independent permission flags on a period.
///
/// The flags are separately mutable; flipping one never touches the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionFlag {
    /// Whether evaluators may configure criteria for this period.
    CriteriaSetting,
    /// Whether employees may record self-evaluations.
    SelfEvaluationSetting,
    /// Whether final evaluation entry is open.
    FinalEvaluationSetting,
}

impl PermissionFlag {
    /// Returns the string representation used for the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CriteriaSetting => "criteria_setting",
            Self::SelfEvaluationSetting => "self_evaluation_setting",
            Self::FinalEvaluationSetting => "final_evaluation_setting",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "criteria_setting" => Ok(Self::CriteriaSetting),
            "self_evaluation_setting" => Ok(Self::SelfEvaluationSetting),
            "final_evaluation_setting" => Ok(Self::FinalEvaluationSetting),
            _ => Err(DomainError::InvalidPermissionFlag {
                flag: s.to_string(),
            }),
        }
    }
}

impl FromStr for PermissionFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for PermissionFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
