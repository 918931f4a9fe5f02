// Constants for the retry engine
use std::time::Duration;

/// Default number of retries after the first attempt (0 = no retries)
pub const DEFAULT_RETRY_TIMES: u32 = 0;

/// Default delay between attempts when no strategy is configured
pub const DEFAULT_DELAY: Duration = Duration::ZERO;

/// Largest `retry_times` accepted from loaded settings
pub const MAX_RETRY_TIMES: u32 = 1000;

/// Operation name used in log fields when the caller does not provide one
pub const UNNAMED_OPERATION: &str = "unnamed";
