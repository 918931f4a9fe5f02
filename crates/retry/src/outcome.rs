//! Failure classification for a single attempt
//!
//! An operation reports a failed attempt as a [`Failure`]. Plain errors are
//! retryable; wrapping one with [`terminal`] (or returning
//! [`Failure::stop`]) ends the run immediately, whatever budget remains.
//!
//! Because `From<E>` produces [`Failure::Retryable`], `?` inside an
//! operation marks errors retryable by default:
//!
//! ```
//! use pulsearc_retry::{terminal, Failure};
//!
//! fn fetch(status: u16) -> Result<(), Failure<std::io::Error>> {
//!     if status == 404 {
//!         return Err(terminal(std::io::Error::other("not found")));
//!     }
//!     std::fs::metadata("/definitely/missing").map(|_| ())?;
//!     Ok(())
//! }
//!
//! assert!(fetch(404).unwrap_err().is_terminal());
//! assert!(!fetch(200).unwrap_err().is_terminal());
//! ```

/// Outcome of a failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<E> {
    /// The attempt failed and may be retried while budget remains
    Retryable(E),
    /// Stop retrying; `None` means the run ends successfully
    Terminal(Option<E>),
}

impl<E> Failure<E> {
    /// Mark an error as retryable
    pub fn retryable(error: E) -> Self {
        Self::Retryable(error)
    }

    /// Stop retrying and report success
    pub fn stop() -> Self {
        Self::Terminal(None)
    }

    /// Whether this failure ends the run regardless of budget
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    /// The carried error, if any
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Retryable(err) => Some(err),
            Self::Terminal(err) => err,
        }
    }
}

impl<E> From<E> for Failure<E> {
    fn from(error: E) -> Self {
        Self::Retryable(error)
    }
}

/// Mark an error as terminal: the run stops and returns it unchanged
pub fn terminal<E>(error: E) -> Failure<E> {
    Failure::Terminal(Some(error))
}
