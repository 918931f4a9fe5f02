//! Retry configuration and its builder
//!
//! A [`RetryConfig`] holds no per-run state: it is fixed once built and can
//! be shared (cloned or borrowed) across any number of concurrent runs.

use std::fmt;
use std::sync::Arc;

use crate::constants::DEFAULT_RETRY_TIMES;
use crate::delay::DelayStrategy;

/// Observer invoked before retry attempt `n` (n >= 1)
type OnRetryFn = Arc<dyn Fn(u32) + Send + Sync>;

/// Observer invoked after attempt `n` failed (n >= 0)
type OnFailedFn<E> = Arc<dyn Fn(u32, &E) + Send + Sync>;

/// Configuration for a retry run
pub struct RetryConfig<E> {
    /// Number of retries after the first attempt
    pub(crate) retry_times: u32,
    pub(crate) on_retry: OnRetryFn,
    pub(crate) on_failed: OnFailedFn<E>,
    pub(crate) delay_strategy: DelayStrategy<E>,
}

impl<E> Clone for RetryConfig<E> {
    fn clone(&self) -> Self {
        Self {
            retry_times: self.retry_times,
            on_retry: Arc::clone(&self.on_retry),
            on_failed: Arc::clone(&self.on_failed),
            delay_strategy: self.delay_strategy.clone(),
        }
    }
}

impl<E> fmt::Debug for RetryConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfig")
            .field("retry_times", &self.retry_times)
            .field("delay_strategy", &self.delay_strategy)
            .finish_non_exhaustive()
    }
}

impl<E: 'static> Default for RetryConfig<E> {
    fn default() -> Self {
        Self {
            retry_times: DEFAULT_RETRY_TIMES,
            on_retry: Arc::new(ignore_retry),
            on_failed: Arc::new(ignore_failure::<E>),
            delay_strategy: DelayStrategy::default(),
        }
    }
}

impl<E: 'static> RetryConfig<E> {
    /// A configuration with no retries, no observers and no delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder
    pub fn builder() -> RetryConfigBuilder<E> {
        RetryConfigBuilder::new()
    }
}

impl<E> RetryConfig<E> {
    /// Number of retries after the first attempt
    pub fn retry_times(&self) -> u32 {
        self.retry_times
    }

    /// Upper bound on operation invocations for one run
    pub fn max_attempts(&self) -> u64 {
        u64::from(self.retry_times) + 1
    }

    /// The configured delay strategy
    pub fn delay_strategy(&self) -> &DelayStrategy<E> {
        &self.delay_strategy
    }
}

fn ignore_retry(_attempt: u32) {}

fn ignore_failure<E>(_attempt: u32, _error: &E) {}

/// Builder for [`RetryConfig`]
///
/// Each setter replaces the previous value of its field.
pub struct RetryConfigBuilder<E> {
    config: RetryConfig<E>,
}

impl<E> fmt::Debug for RetryConfigBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfigBuilder").field("config", &self.config).finish()
    }
}

impl<E: 'static> Default for RetryConfigBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> RetryConfigBuilder<E> {
    pub fn new() -> Self {
        Self { config: RetryConfig::default() }
    }

    /// Number of retries after the first attempt (0 = no retries)
    pub fn times(mut self, retry_times: u32) -> Self {
        self.config.retry_times = retry_times;
        self
    }

    /// Called before each retry with the retry number, starting at 1
    pub fn on_retry<F>(mut self, on_retry: F) -> Self
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        self.config.on_retry = Arc::new(on_retry);
        self
    }

    /// Called after every failed attempt, starting at attempt 0
    pub fn on_failed<F>(mut self, on_failed: F) -> Self
    where
        F: Fn(u32, &E) + Send + Sync + 'static,
    {
        self.config.on_failed = Arc::new(on_failed);
        self
    }

    pub fn delay_strategy(mut self, strategy: DelayStrategy<E>) -> Self {
        self.config.delay_strategy = strategy;
        self
    }

    pub fn build(self) -> RetryConfig<E> {
        self.config
    }
}
