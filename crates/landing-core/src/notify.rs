#![forbid(unsafe_code)]

//! Notification seam shared by the form controller and the presenter.

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Positive confirmation.
    Success,
    /// Something the user must act on.
    Error,
    /// Neutral information.
    #[default]
    Info,
}

impl Severity {
    /// CSS modifier class for this severity.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Failure to present a notification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    /// The presenter has been torn down.
    #[error("notification presenter is closed")]
    Closed,
}

/// Anything that can surface a transient message to the user.
pub trait Notifier {
    /// Show `message` at `now`, replacing any message currently shown.
    fn notify(
        &mut self,
        message: &str,
        severity: Severity,
        now: Duration,
    ) -> Result<(), NotifyError>;
}
