//! Bounded retry execution for fallible async operations.
//!
//! The engine invokes an operation until it succeeds, fails terminally,
//! exhausts its retry budget or a cancellation signal fires. Between
//! attempts it waits for a delay computed by a [`DelayStrategy`], racing the
//! wait against the [`CancelSignal`].
//!
//! # Outcomes
//!
//! | Run ended by | Result |
//! |--------------|--------|
//! | success | `Ok(())` |
//! | [`terminal`] error | `Err(RetryError::Failed(inner))` |
//! | [`Failure::stop`] | `Ok(())` |
//! | budget exhausted | `Err(RetryError::Failed(last_error))` |
//! | cancellation / deadline | `Err(RetryError::Cancelled(reason))` |
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use pulsearc_retry::{terminal, CancelSignal, DelayStrategy, RetryConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = RetryConfig::builder()
//!     .times(5)
//!     .on_failed(|n, err: &std::io::Error| eprintln!("attempt {n} failed: {err}"))
//!     .delay_strategy(DelayStrategy::exponential(
//!         Duration::from_millis(1),
//!         Duration::from_millis(10),
//!     ))
//!     .build();
//!
//! let signal = CancelSignal::with_timeout(Duration::from_secs(5));
//! let result = config
//!     .run(&signal, || async {
//!         Err::<(), _>(terminal(std::io::Error::other("permission denied")))
//!     })
//!     .await;
//!
//! assert_eq!(result.unwrap_err().to_string(), "permission denied");
//! # }
//! ```
//!
//! # Feature Tiers
//!
//! - default: the engine, delay strategies and cancellation signal
//! - `serde` (on by default): [`RetrySettings`] loadable from TOML

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod cancel;
pub mod config;
pub mod constants;
pub mod delay;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod outcome;
#[cfg(feature = "serde")]
pub mod settings;
pub mod tracing;
#[cfg(feature = "serde")]
pub mod utils;

// Re-export commonly used types for convenience
// ------------------------
pub use cancel::CancelSignal;
pub use config::{RetryConfig, RetryConfigBuilder};
pub use delay::DelayStrategy;
pub use engine::run;
#[cfg(feature = "serde")]
pub use error::SettingsError;
pub use error::{Cancelled, RetryError, RetryResult};
pub use metrics::RetryMetrics;
pub use outcome::{terminal, Failure};
#[cfg(feature = "serde")]
pub use settings::{DelaySettings, RetrySettings};
pub use tokio_util::sync::CancellationToken;
#[cfg(feature = "serde")]
pub use utils::duration_millis;
