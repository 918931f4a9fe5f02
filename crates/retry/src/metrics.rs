// Summary of a single retry run
use std::fmt;
use std::time::Duration;

/// Metrics collected during one retry run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryMetrics {
    /// Number of times the operation was invoked
    pub attempts: u32,
    /// Total delay requested between attempts that were actually waited out
    pub total_delay: Duration,
    /// Whether the run ended without an error
    pub succeeded: bool,
    /// Whether the run was ended by the cancellation signal
    pub cancelled: bool,
    /// Whether the run was ended by a terminal failure
    pub terminal: bool,
}

impl RetryMetrics {
    /// Create new metrics with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retries made after the first attempt
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }

    /// Get the average delay between attempts
    pub fn average_delay(&self) -> Option<Duration> {
        if self.attempts <= 1 {
            None
        } else {
            Some(self.total_delay / (self.attempts - 1))
        }
    }

    /// Get success rate (1.0 if succeeded, 0.0 if failed)
    pub fn success_rate(&self) -> f64 {
        if self.succeeded {
            1.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for RetryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RetryMetrics {{ attempts: {}, total_delay: {:?}, succeeded: {}, cancelled: {}, terminal: {} }}",
            self.attempts, self.total_delay, self.succeeded, self.cancelled, self.terminal
        )
    }
}
