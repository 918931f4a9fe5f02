// Error types for the retry engine
use thiserror::Error;

/// Reason a cancellation signal fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Cancelled {
    /// The signal was cancelled explicitly
    #[error("operation cancelled")]
    Cancelled,

    /// The signal's deadline elapsed
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// Errors returned by a retry run
///
/// `Failed` carries the operation's own error untouched: either the last
/// retryable error once the budget is spent, or the inner error of a
/// terminal failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryError<E> {
    /// The operation failed and no further attempt will be made
    #[error(transparent)]
    Failed(E),

    /// The cancellation signal fired before or between attempts
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl<E> RetryError<E> {
    /// Whether the run ended because the cancellation signal fired
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// The cancellation reason, if the run was cancelled
    pub fn cancellation(&self) -> Option<Cancelled> {
        match self {
            Self::Cancelled(reason) => Some(*reason),
            Self::Failed(_) => None,
        }
    }

    /// Borrow the operation error, if the run ended with one
    pub fn operation_error(&self) -> Option<&E> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Cancelled(_) => None,
        }
    }

    /// Take the operation error, discarding cancellation outcomes
    pub fn into_operation_error(self) -> Option<E> {
        match self {
            Self::Failed(err) => Some(err),
            Self::Cancelled(_) => None,
        }
    }
}

/// Result type for retry runs
pub type RetryResult<E> = Result<(), RetryError<E>>;

/// Errors produced while loading retry settings
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read retry settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse retry settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid retry setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

#[cfg(feature = "serde")]
impl SettingsError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid { field, message: message.into() }
    }
}
