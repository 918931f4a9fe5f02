//! Structured logging for retry runs
//!
//! This module records the lifecycle of a retry run through the `tracing`
//! crate: one event when the run starts, one per attempt and failure, and
//! one for the way it ended.

use std::fmt::Display;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::Cancelled;

/// Entry point for retry run instrumentation
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryTracer;

impl RetryTracer {
    /// Create a new retry tracer
    pub fn new() -> Self {
        Self
    }

    /// Start a retry run span
    pub fn start_retry_span(&self, operation_name: &str, retry_times: u32) -> RetrySpan {
        debug!(operation = operation_name, retry_times = retry_times, "Starting retry operation");

        RetrySpan { operation_name: operation_name.to_string(), retry_times }
    }
}

/// A span representing one retry run
#[derive(Debug)]
pub struct RetrySpan {
    operation_name: String,
    retry_times: u32,
}

impl RetrySpan {
    /// Record the start of an attempt
    pub fn record_attempt(&mut self, attempt: u32) {
        if attempt > 0 {
            debug!(
                operation = %self.operation_name,
                attempt = attempt,
                retry_times = self.retry_times,
                "Retry attempt"
            );
        }
    }

    /// Record a failed attempt
    pub fn record_failure(&mut self, attempt: u32, error: &dyn Display) {
        warn!(
            operation = %self.operation_name,
            attempt = attempt,
            error = %error,
            "Retry attempt failed"
        );
    }

    /// Record the delay chosen before the next attempt
    pub fn record_delay(&mut self, attempt: u32, delay: Duration, strategy: &str) {
        debug!(
            operation = %self.operation_name,
            attempt = attempt,
            delay_ms = delay.as_millis(),
            strategy = strategy,
            "Backing off before next attempt"
        );
    }

    /// Record a successful run
    pub fn record_success(&mut self, attempts: u32, total_delay: Duration) {
        if attempts > 1 {
            info!(
                operation = %self.operation_name,
                attempts = attempts,
                total_delay_ms = total_delay.as_millis(),
                "Retry operation succeeded"
            );
        }
    }

    /// Record a terminal failure, with or without an error
    pub fn record_terminal(&mut self, attempt: u32, error: Option<&dyn Display>) {
        match error {
            Some(error) => warn!(
                operation = %self.operation_name,
                attempt = attempt,
                error = %error,
                "Terminal failure, not retrying"
            ),
            None => debug!(
                operation = %self.operation_name,
                attempt = attempt,
                "Operation stopped retrying without error"
            ),
        }
    }

    /// Record that the retry budget has been spent
    pub fn record_exhausted(&mut self, attempts: u32, total_delay: Duration) {
        warn!(
            operation = %self.operation_name,
            attempts = attempts,
            retry_times = self.retry_times,
            total_delay_ms = total_delay.as_millis(),
            "All retry attempts exhausted"
        );
    }

    /// Record that the cancellation signal ended the run
    pub fn record_cancelled(&mut self, reason: Cancelled, attempts: u32) {
        warn!(
            operation = %self.operation_name,
            attempts = attempts,
            reason = %reason,
            "Retry operation cancelled"
        );
    }

    /// End the span
    pub fn end(self) {
        // Span will be dropped, which ends it in tracing
    }
}
