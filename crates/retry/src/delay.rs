//! Delay strategies for computing the wait between attempts
//!
//! A [`DelayStrategy`] maps the index of the attempt that just failed and its
//! error to the duration to wait before the next attempt. The engine only
//! consults it when another attempt will actually be made, so the last,
//! budget-exhausting failure is never charged a delay.
//!
//! Four built-ins are provided:
//!
//! | Strategy | Delay for attempt `n` |
//! |----------|-----------------------|
//! | [`fixed`](DelayStrategy::fixed) | `d` |
//! | [`linear`](DelayStrategy::linear) | `min(base * (n + 1), max)` |
//! | [`exponential`](DelayStrategy::exponential) | `min(base * 2^n, max)` |
//! | [`random`](DelayStrategy::random) | uniform in `[min, max]` |
//!
//! Any other policy can be expressed with [`DelayStrategy::new`], for
//! example one that inspects the error:
//!
//! ```
//! use std::time::Duration;
//!
//! use pulsearc_retry::DelayStrategy;
//!
//! #[derive(Debug)]
//! enum ApiError {
//!     RateLimited,
//!     Unavailable,
//! }
//!
//! let strategy = DelayStrategy::new(|_n, err: &ApiError| match err {
//!     ApiError::RateLimited => Duration::from_secs(30),
//!     ApiError::Unavailable => Duration::from_millis(200),
//! });
//!
//! assert_eq!(strategy.delay(0, &ApiError::RateLimited), Duration::from_secs(30));
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::constants::DEFAULT_DELAY;

/// Type alias for the delay function to reduce complexity
type DelayFn<E> = Arc<dyn Fn(u32, &E) -> Duration + Send + Sync>;

/// Function computing the wait before the next attempt
pub struct DelayStrategy<E> {
    kind: &'static str,
    delay_fn: DelayFn<E>,
}

impl<E> Clone for DelayStrategy<E> {
    fn clone(&self) -> Self {
        Self { kind: self.kind, delay_fn: Arc::clone(&self.delay_fn) }
    }
}

impl<E> fmt::Debug for DelayStrategy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DelayStrategy({})", self.kind)
    }
}

impl<E: 'static> Default for DelayStrategy<E> {
    fn default() -> Self {
        Self::fixed(DEFAULT_DELAY)
    }
}

impl<E: 'static> DelayStrategy<E> {
    /// Wrap a caller-supplied delay function
    pub fn new<F>(delay_fn: F) -> Self
    where
        F: Fn(u32, &E) -> Duration + Send + Sync + 'static,
    {
        Self::with_kind("custom", delay_fn)
    }

    /// Always wait `delay`
    pub fn fixed(delay: Duration) -> Self {
        Self::with_kind("fixed", move |_, _| delay)
    }

    /// Wait `base * (n + 1)`, capped at `max`
    pub fn linear(base: Duration, max: Duration) -> Self {
        Self::with_kind("linear", move |n, _| linear_delay(base, max, n))
    }

    /// Wait `base * 2^n`, capped at `max`
    pub fn exponential(base: Duration, max: Duration) -> Self {
        Self::with_kind("exponential", move |n, _| exponential_delay(base, max, n))
    }

    /// Wait a uniformly random duration in `[min, max]`, seeded from OS
    /// entropy
    pub fn random(min: Duration, max: Duration) -> Self {
        Self::random_with_rng(min, max, StdRng::from_entropy())
    }

    /// Like [`random`](Self::random) but deterministic for a given seed
    pub fn random_seeded(min: Duration, max: Duration, seed: u64) -> Self {
        Self::random_with_rng(min, max, StdRng::seed_from_u64(seed))
    }

    /// Like [`random`](Self::random) drawing from the supplied generator
    ///
    /// `max` is raised to `min` when it is smaller. The generator is shared by
    /// every clone of the strategy.
    pub fn random_with_rng<R>(min: Duration, max: Duration, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        let max = max.max(min);
        let span_nanos = u64::try_from((max - min).as_nanos()).unwrap_or(u64::MAX);
        let rng = Mutex::new(rng);

        Self::with_kind("random", move |_, _| {
            if span_nanos == 0 {
                return min;
            }
            let offset = rng.lock().gen_range(0..=span_nanos);
            min.saturating_add(Duration::from_nanos(offset))
        })
    }

    fn with_kind<F>(kind: &'static str, delay_fn: F) -> Self
    where
        F: Fn(u32, &E) -> Duration + Send + Sync + 'static,
    {
        Self { kind, delay_fn: Arc::new(delay_fn) }
    }
}

impl<E> DelayStrategy<E> {
    /// Compute the delay after attempt `attempt` failed with `error`
    pub fn delay(&self, attempt: u32, error: &E) -> Duration {
        (self.delay_fn)(attempt, error)
    }

    /// Short name of the strategy, used in log fields
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn linear_delay(base: Duration, max: Duration, attempt: u32) -> Duration {
    clamp_nanos(base.as_nanos().checked_mul(u128::from(attempt) + 1), max)
}

fn exponential_delay(base: Duration, max: Duration, attempt: u32) -> Duration {
    if base.is_zero() {
        return Duration::ZERO;
    }
    let nanos = 1_u128.checked_shl(attempt).and_then(|factor| base.as_nanos().checked_mul(factor));
    clamp_nanos(nanos, max)
}

/// `nanos` as a duration, or `max` when it overflowed or exceeds `max`
fn clamp_nanos(nanos: Option<u128>, max: Duration) -> Duration {
    match nanos {
        Some(nanos) if nanos <= max.as_nanos() => duration_from_nanos(nanos).unwrap_or(max),
        _ => max,
    }
}

fn duration_from_nanos(nanos: u128) -> Option<Duration> {
    let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
    let subsec = u32::try_from(nanos % NANOS_PER_SEC).ok()?;
    Some(Duration::new(secs, subsec))
}
