//! Results of screen actions and the messages shown for them

use holybeats_core::HolyBeatsError;
use serde::{Deserialize, Serialize};

/// What happened to a screen action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran to completion
    Completed,
    /// The user must sign in first; the action was not attempted
    LoginRequired,
    /// Rejected locally before any network call
    Rejected(String),
    /// The server or network failed; nothing was retried
    Failed(String),
    /// A newer request for the same collection made this result stale
    Superseded,
    /// The user backed out (e.g. declined a confirmation)
    Cancelled,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Map a service failure onto the outcome the user sees
    pub fn from_error(error: &HolyBeatsError) -> Self {
        match error {
            HolyBeatsError::Unauthorized => Self::LoginRequired,
            HolyBeatsError::Validation(message) => Self::Rejected(message.clone()),
            HolyBeatsError::AuthFailed(message) => Self::Failed(message.clone()),
            HolyBeatsError::Network(_) => Self::Failed("Server unreachable".to_string()),
            other => Self::Failed(other.to_string()),
        }
    }
}

impl From<HolyBeatsError> for Outcome {
    fn from(error: HolyBeatsError) -> Self {
        Self::from_error(&error)
    }
}

/// Severity of a [`Notice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Short user-visible message left behind by the last action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    /// Notice for a failed or rejected outcome, if it warrants one
    pub fn for_outcome(outcome: &Outcome) -> Option<Self> {
        match outcome {
            Outcome::Rejected(message) | Outcome::Failed(message) => Some(Self::error(message)),
            _ => None,
        }
    }
}
