//! Server-assigned creation timestamps.

use core::fmt;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A creation timestamp exactly as the backend sent it.
///
/// The backend does not guarantee a timezone suffix, so the raw string is
/// kept and only interpreted for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Create a timestamp from its wire representation.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the raw wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format for table display.
    ///
    /// RFC 3339 values and naive ISO-8601 date-times render as
    /// `YYYY-MM-DD HH:MM:SS`; anything else is shown verbatim.
    #[must_use]
    pub fn display(&self) -> String {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.0) {
            return parsed.format(DISPLAY_FORMAT).to_string();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f") {
            return parsed.format(DISPLAY_FORMAT).to_string();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%d %H:%M:%S%.f") {
            return parsed.format(DISPLAY_FORMAT).to_string();
        }
        self.0.clone()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rfc3339() {
        let ts = Timestamp::new("2024-03-01T10:20:30Z");
        assert_eq!(ts.display(), "2024-03-01 10:20:30");
    }

    #[test]
    fn test_display_naive_with_fraction() {
        let ts = Timestamp::new("2024-03-01T10:20:30.123456");
        assert_eq!(ts.display(), "2024-03-01 10:20:30");
    }

    #[test]
    fn test_display_unparseable_is_verbatim() {
        let ts = Timestamp::new("yesterday");
        assert_eq!(ts.display(), "yesterday");
    }
}
