//! Error types for the action system.

use thiserror::Error;

/// Result type for action operations.
pub type Result<T> = std::result::Result<T, MotionError>;

/// Errors that can occur while building or running actions.
///
/// Lifecycle misuse (calling `step` before `start`, or advancing a runner
/// that has already been retired) is a programmer error, not a recoverable
/// condition, and panics instead of returning a variant here.
#[derive(Error, Debug)]
pub enum MotionError {
    /// A constructor or builder was given an unusable argument.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Reversal was requested for an action with no defined reverse.
    #[error("'{action}' has no defined reverse")]
    NotReversible { action: &'static str },

    /// An external callback invoked by `CallFunc`/`CallFuncWith` failed.
    #[error("callback failed: {0}")]
    Callback(#[source] anyhow::Error),
}

impl MotionError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
