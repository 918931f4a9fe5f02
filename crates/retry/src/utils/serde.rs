//! Serialization utilities for settings types

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

/// Custom serialization module for Duration as milliseconds
///
/// Durations are written as whole milliseconds (u64), saturating at
/// `i64::MAX` so every value fits a TOML integer. Durations up to that bound
/// read back unchanged; longer ones read back as the bound.
///
/// # Usage
/// ```rust
/// use std::time::Duration;
///
/// use pulsearc_retry::duration_millis;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Example {
///     #[serde(with = "duration_millis")]
///     delay: Duration,
/// }
/// ```
pub mod duration_millis {
    use super::*;

    /// Largest millisecond count written, the TOML integer limit
    pub const MAX_MILLIS: u64 = i64::MAX as u64;

    /// Serde serialization result type
    type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

    /// Serialize a Duration as milliseconds (u64)
    pub fn serialize<S>(duration: &Duration, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).map_or(MAX_MILLIS, |m| m.min(MAX_MILLIS));
        serializer.serialize_u64(millis)
    }

    /// Deserialize milliseconds (u64) into a Duration
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for serialization utilities

    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct TestStruct {
        #[serde(with = "duration_millis")]
        delay: Duration,
        name: String,
    }

    /// Tests that milliseconds deserialize to Duration
    #[test]
    fn test_duration_millis_deserialize() {
        let json = r#"{"delay":2500,"name":"test"}"#;
        let data: TestStruct = serde_json::from_str(json).expect("Should deserialize valid JSON");

        assert_eq!(data.delay, Duration::from_millis(2500));
        assert_eq!(data.name, "test");
    }

    /// Validates sub-millisecond precision is truncated on write.
    ///
    /// Assertions:
    /// - Ensures `json.contains("\"delay\":1")` evaluates to true.
    #[test]
    fn test_duration_millis_truncates_sub_millis() {
        let data = TestStruct { delay: Duration::from_micros(1999), name: "micros".to_string() };

        let json = serde_json::to_string(&data).expect("Should serialize");
        assert!(json.contains("\"delay\":1"));
    }

    /// Validates the duration millis deserialize invalid json scenario.
    ///
    /// Assertions:
    /// - Ensures `result.is_err()` evaluates to true.
    #[test]
    fn test_duration_millis_rejects_negative() {
        let invalid_json = r#"{"delay":-5,"name":"test"}"#;
        let result: Result<TestStruct, _> = serde_json::from_str(invalid_json);
        assert!(result.is_err());
    }

    /// Validates oversized durations still encode as TOML.
    ///
    /// Assertions:
    /// - Confirms `Duration::MAX` writes as `i64::MAX` milliseconds.
    /// - Confirms the written value reads back as the saturation bound.
    #[test]
    fn test_duration_millis_saturates_within_toml_range() {
        let data = TestStruct { delay: Duration::MAX, name: "forever".to_string() };

        let encoded = toml::to_string(&data).expect("Should serialize as TOML");
        assert!(encoded.contains(&format!("delay = {}", i64::MAX)));

        let decoded: TestStruct = toml::from_str(&encoded).expect("Should deserialize TOML");
        assert_eq!(decoded.delay, Duration::from_millis(duration_millis::MAX_MILLIS));
    }
}
