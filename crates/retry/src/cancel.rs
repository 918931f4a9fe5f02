//! Cancellation signal observed by the retry engine
//!
//! [`CancelSignal`] pairs a [`CancellationToken`] with an optional deadline.
//! It can be queried for whether it already fired and awaited until it
//! fires, which is everything the engine needs to race a retry delay against
//! cancellation.
//!
//! Deadlines use [`tokio::time::Instant`], so they follow paused test time.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::Cancelled;

/// Cloneable cancellation handle with an optional deadline
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CancelSignal {
    /// A signal that fires only when [`cancel`](Self::cancel) is called
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe an existing token, e.g. a service's shutdown token
    pub fn from_token(token: CancellationToken) -> Self {
        Self { token, deadline: None }
    }

    /// A signal that also fires once `timeout` has elapsed from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { token: CancellationToken::new(), deadline: Instant::now().checked_add(timeout) }
    }

    /// A signal that also fires at `deadline`
    pub fn with_deadline(deadline: Instant) -> Self {
        Self { token: CancellationToken::new(), deadline: Some(deadline) }
    }

    /// A child signal, cancelled whenever this one is
    ///
    /// Cancelling the child leaves the parent untouched. The deadline is
    /// inherited.
    pub fn child(&self) -> Self {
        Self { token: self.token.child_token(), deadline: self.deadline }
    }

    /// A child signal whose deadline is the earlier of the parent's and
    /// `timeout` from now
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let own = Instant::now().checked_add(timeout);
        let deadline = match (self.deadline, own) {
            (Some(parent), Some(own)) => Some(parent.min(own)),
            (parent, own) => parent.or(own),
        };
        Self { token: self.token.child_token(), deadline }
    }

    /// Fire the signal
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The underlying token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The deadline, if one was set
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Why the signal fired, or `None` if it has not
    ///
    /// Explicit cancellation takes precedence over an elapsed deadline.
    pub fn error(&self) -> Option<Cancelled> {
        if self.token.is_cancelled() {
            return Some(Cancelled::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(Cancelled::DeadlineExceeded),
            _ => None,
        }
    }

    /// Whether the signal has fired
    pub fn is_fired(&self) -> bool {
        self.error().is_some()
    }

    /// Wait until the signal fires and report why
    pub async fn fired(&self) -> Cancelled {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    () = self.token.cancelled() => Cancelled::Cancelled,
                    () = tokio::time::sleep_until(deadline) => Cancelled::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                Cancelled::Cancelled
            }
        }
    }
}
