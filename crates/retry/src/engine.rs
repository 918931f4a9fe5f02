//! Retry execution engine
//!
//! Drives an operation through a run of attempts:
//!
//! 1. If the signal already fired, return its reason without invoking the
//!    operation.
//! 2. Before every attempt after the first, call `on_retry(n)`; then invoke
//!    the operation once.
//! 3. `Ok(())` ends the run. A terminal failure ends it with the unwrapped
//!    error (or success when there is none). A retryable error is reported
//!    to `on_failed(n, &err)` and, if budget remains, the engine waits for
//!    the strategy's delay.
//! 4. The wait races the delay timer against the cancellation signal. If
//!    the signal wins, the run ends with its reason and the pending
//!    operation error is dropped; the timer is released either way.
//!
//! Cancellation is only observed before the first attempt and while
//! waiting. An operation that is already running is never interrupted.

use std::fmt::Display;
use std::future::Future;

use crate::cancel::CancelSignal;
use crate::config::RetryConfig;
use crate::constants::UNNAMED_OPERATION;
use crate::error::{RetryError, RetryResult};
use crate::metrics::RetryMetrics;
use crate::outcome::Failure;
use crate::tracing::{RetrySpan, RetryTracer};

/// Type alias for a run result with metrics (clippy::type_complexity)
type RetryResultWithMetrics<E> = (RetryResult<E>, RetryMetrics);

/// Run `operation` under `config` until it succeeds, fails terminally,
/// exhausts its retries or `signal` fires
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use pulsearc_retry::{run, CancelSignal, DelayStrategy, Failure, RetryConfig};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let config = RetryConfig::builder()
///     .times(3)
///     .delay_strategy(DelayStrategy::fixed(Duration::from_millis(1)))
///     .build();
///
/// let mut calls = 0;
/// let result = run(
///     &CancelSignal::new(),
///     || {
///         calls += 1;
///         let outcome = if calls < 3 {
///             Err(Failure::Retryable(std::io::Error::other("busy")))
///         } else {
///             Ok(())
///         };
///         async move { outcome }
///     },
///     &config,
/// )
/// .await;
///
/// assert!(result.is_ok());
/// assert_eq!(calls, 3);
/// # }
/// ```
pub async fn run<F, Fut, E>(
    signal: &CancelSignal,
    operation: F,
    config: &RetryConfig<E>,
) -> RetryResult<E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), Failure<E>>>,
    E: Display,
{
    config.run(signal, operation).await
}

impl<E: Display> RetryConfig<E> {
    /// Run `operation` under this configuration
    pub async fn run<F, Fut>(&self, signal: &CancelSignal, operation: F) -> RetryResult<E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), Failure<E>>>,
    {
        self.run_with_metrics(UNNAMED_OPERATION, signal, operation).await.0
    }

    /// Run `operation`, tagging log events with `operation_name`
    pub async fn run_named<F, Fut>(
        &self,
        operation_name: &str,
        signal: &CancelSignal,
        operation: F,
    ) -> RetryResult<E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), Failure<E>>>,
    {
        self.run_with_metrics(operation_name, signal, operation).await.0
    }

    /// Run `operation` and also report how the run went
    pub async fn run_with_metrics<F, Fut>(
        &self,
        operation_name: &str,
        signal: &CancelSignal,
        mut operation: F,
    ) -> RetryResultWithMetrics<E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), Failure<E>>>,
    {
        let mut span = RetryTracer::new().start_retry_span(operation_name, self.retry_times);
        let mut metrics = RetryMetrics::new();

        if let Some(reason) = signal.error() {
            metrics.cancelled = true;
            span.record_cancelled(reason, 0);
            return finish(span, Err(reason.into()), metrics);
        }

        let mut attempt: u32 = 0;
        loop {
            if attempt > 0 {
                (self.on_retry)(attempt);
            }
            span.record_attempt(attempt);
            metrics.attempts = attempt.saturating_add(1);

            let error = match operation().await {
                Ok(()) => {
                    metrics.succeeded = true;
                    span.record_success(metrics.attempts, metrics.total_delay);
                    return finish(span, Ok(()), metrics);
                }
                Err(Failure::Terminal(inner)) => {
                    metrics.terminal = true;
                    let result = match inner {
                        Some(err) => {
                            (self.on_failed)(attempt, &err);
                            span.record_terminal(attempt, Some(&err));
                            Err(RetryError::Failed(err))
                        }
                        None => {
                            metrics.succeeded = true;
                            span.record_terminal(attempt, None);
                            Ok(())
                        }
                    };
                    return finish(span, result, metrics);
                }
                Err(Failure::Retryable(err)) => err,
            };

            (self.on_failed)(attempt, &error);
            span.record_failure(attempt, &error);

            if attempt >= self.retry_times {
                span.record_exhausted(metrics.attempts, metrics.total_delay);
                return finish(span, Err(RetryError::Failed(error)), metrics);
            }

            let delay = self.delay_strategy.delay(attempt, &error);
            span.record_delay(attempt, delay, self.delay_strategy.kind());

            // Dropping the losing branch releases the timer.
            tokio::select! {
                biased;
                reason = signal.fired() => {
                    metrics.cancelled = true;
                    span.record_cancelled(reason, metrics.attempts);
                    return finish(span, Err(reason.into()), metrics);
                }
                () = tokio::time::sleep(delay) => {}
            }

            metrics.total_delay = metrics.total_delay.saturating_add(delay);
            attempt += 1;
        }
    }
}

fn finish<E>(
    span: RetrySpan,
    result: RetryResult<E>,
    metrics: RetryMetrics,
) -> RetryResultWithMetrics<E> {
    span.end();
    (result, metrics)
}
