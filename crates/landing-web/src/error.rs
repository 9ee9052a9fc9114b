#![forbid(unsafe_code)]

//! Page runtime errors.

use landing_core::notify::NotifyError;
use landing_forms::{FormError, RuleError};

/// Failure inside the page runtime.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The configuration JSON could not be parsed.
    #[error("invalid page config: {0}")]
    Config(#[source] serde_json::Error),
    /// An event from the host could not be decoded.
    #[error("invalid page event: {0}")]
    Event(#[source] serde_json::Error),
    /// Patches could not be encoded for the host.
    #[error("patch encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
    /// A validation rule did not compile.
    #[error(transparent)]
    Rules(#[from] RuleError),
    /// The form could not be mounted.
    #[error(transparent)]
    Form(#[from] FormError),
    /// A notification could not be shown.
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
