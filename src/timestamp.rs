//! Time-range timestamp validation
//!
//! Timestamps are accepted in `HH:MM:SS` or `MM:SS` form: 2 or 3
//! colon-separated components, each a non-negative integer. Validation is
//! purely syntactic - no upper bound is enforced on any component, so
//! `99:99:99` is accepted and left for the external tool to interpret. The
//! accepted text is stored verbatim because it is passed through to yt-dlp
//! unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A validated segment timestamp, stored as the exact text the user entered.
///
/// Construct via [`str::parse`] / [`FromStr`](std::str::FromStr); an
/// instance existing at all means the text passed the grammar.
///
/// # Examples
///
/// ```
/// use segment_dl::Timestamp;
///
/// let start: Timestamp = "00:01:00".parse()?;
/// assert_eq!(start.as_str(), "00:01:00");
/// # Ok::<(), segment_dl::TimestampError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(String);

impl Timestamp {
    /// Checks whether `text` matches the accepted timestamp grammar.
    ///
    /// Purely syntactic: minutes and seconds above 59 are still accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use segment_dl::Timestamp;
    ///
    /// assert!(Timestamp::is_valid("01:30"));
    /// assert!(Timestamp::is_valid("1:02:03"));
    /// assert!(Timestamp::is_valid("99:99:99"));
    /// assert!(!Timestamp::is_valid(""));
    /// assert!(!Timestamp::is_valid("abc"));
    /// assert!(!Timestamp::is_valid("1:2:3:4"));
    /// ```
    pub fn is_valid(text: &str) -> bool {
        text.parse::<Timestamp>().is_ok()
    }

    /// Returns the timestamp text exactly as it was entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TimestampError::Empty);
        }

        let components: Vec<&str> = s.split(':').collect();
        if components.len() != 2 && components.len() != 3 {
            return Err(TimestampError::ComponentCount(components.len()));
        }

        for component in &components {
            if component.parse::<u64>().is_err() {
                return Err(TimestampError::InvalidComponent((*component).to_string()));
            }
        }

        Ok(Timestamp(s.to_string()))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reason a timestamp failed the grammar check
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// The input was the empty string
    #[error("timestamp is empty")]
    Empty,

    /// Splitting on `:` produced a component count other than 2 or 3
    #[error("expected HH:MM:SS or MM:SS (2 or 3 numeric components), found {0}")]
    ComponentCount(usize),

    /// A component was not a non-negative integer
    #[error("component `{0}` is not a non-negative integer")]
    InvalidComponent(String),
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    // --- accepted grammar ---

    #[test]
    fn two_component_timestamp_is_valid() {
        assert!(Timestamp::is_valid("01:30"));
    }

    #[test]
    fn three_component_timestamp_is_valid() {
        assert!(Timestamp::is_valid("1:02:03"));
    }

    #[test]
    fn out_of_range_components_are_still_valid() {
        // Range is deliberately unchecked; only the shape matters.
        assert!(Timestamp::is_valid("99:99:99"));
    }

    #[test]
    fn single_digit_components_are_valid() {
        assert!(Timestamp::is_valid("0:5"));
        assert!(Timestamp::is_valid("1:2:3"));
    }

    #[test]
    fn zero_timestamp_is_valid() {
        assert!(Timestamp::is_valid("00:00"));
        assert!(Timestamp::is_valid("00:00:00"));
    }

    // --- rejected input ---

    #[test]
    fn empty_string_is_invalid() {
        assert!(!Timestamp::is_valid(""));
        assert_eq!("".parse::<Timestamp>(), Err(TimestampError::Empty));
    }

    #[test]
    fn non_numeric_text_is_invalid() {
        assert!(!Timestamp::is_valid("abc"));
    }

    #[test]
    fn one_component_is_invalid() {
        assert_eq!(
            "90".parse::<Timestamp>(),
            Err(TimestampError::ComponentCount(1)),
            "a bare number has no colon and must be rejected"
        );
    }

    #[test]
    fn four_components_are_invalid() {
        assert_eq!(
            "1:2:3:4".parse::<Timestamp>(),
            Err(TimestampError::ComponentCount(4))
        );
    }

    #[test]
    fn non_numeric_component_is_invalid() {
        assert_eq!(
            "01:xx".parse::<Timestamp>(),
            Err(TimestampError::InvalidComponent("xx".to_string()))
        );
    }

    #[test]
    fn empty_component_is_invalid() {
        // "1::3" splits into ["1", "", "3"] and the middle part fails to parse.
        assert_eq!(
            "1::3".parse::<Timestamp>(),
            Err(TimestampError::InvalidComponent(String::new()))
        );
    }

    #[test]
    fn negative_component_is_invalid() {
        assert!(
            !Timestamp::is_valid("-1:30"),
            "components must be non-negative integers"
        );
    }

    #[test]
    fn interior_whitespace_is_invalid() {
        assert!(!Timestamp::is_valid("01 :30"));
        assert!(!Timestamp::is_valid("01: 30"));
    }

    #[test]
    fn decimal_component_is_invalid() {
        assert!(!Timestamp::is_valid("01:30.5"));
    }

    // --- text preservation ---

    #[test]
    fn accepted_text_is_preserved_verbatim() {
        let ts: Timestamp = "1:2:3".parse().unwrap();
        assert_eq!(
            ts.as_str(),
            "1:2:3",
            "the text is passed through to the external tool and must not be normalized"
        );
        assert_eq!(ts.to_string(), "1:2:3");
    }

    // --- serde ---

    #[test]
    fn deserializing_valid_text_succeeds() {
        let ts: Timestamp = serde_json::from_str(r#""00:01:00""#).unwrap();
        assert_eq!(ts.as_str(), "00:01:00");
    }

    #[test]
    fn deserializing_invalid_text_fails() {
        let result = serde_json::from_str::<Timestamp>(r#""not-a-time""#);
        match result {
            Err(e) => {
                let msg = e.to_string();
                assert!(
                    msg.contains("2 or 3"),
                    "serde error should surface the grammar failure, got: {msg}"
                );
            }
            Ok(ts) => panic!("invalid timestamp text must not deserialize, got: {ts:?}"),
        }
    }

    #[test]
    fn serializing_round_trips_the_text() {
        let ts: Timestamp = "01:30".parse().unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#""01:30""#);
    }
}
