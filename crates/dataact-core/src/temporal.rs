//! # Temporal Types
//!
//! UTC-only timestamp type for reports. Contract reports, batch reports
//! and export file names are all stamped in UTC so that report sets
//! generated on different machines compare cleanly. Local time is a
//! presentation concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A UTC timestamp.
///
/// Serializes to ISO 8601 with a `Z` suffix and second precision
/// (e.g., `2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parse an RFC 3339 timestamp, normalising it to UTC.
    pub fn parse(input: &str) -> CoreResult<Self> {
        DateTime::parse_from_rfc3339(input)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| CoreError::InvalidTimestamp {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// ISO 8601 with `Z` suffix, truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// `YYYY-MM-DD HH:MM:SS`, used by the text renderer.
    pub fn to_display_string(&self) -> String {
        self.0.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// `YYYY-MM-DD`, used in export file names.
    pub fn date_stamp(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timestamp::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 5).unwrap())
    }

    #[test]
    fn canonical_string_has_z_suffix() {
        assert_eq!(fixed().to_canonical_string(), "2026-01-15T12:30:05Z");
    }

    #[test]
    fn display_and_date_stamp_formats() {
        let ts = fixed();
        assert_eq!(ts.to_display_string(), "2026-01-15 12:30:05");
        assert_eq!(ts.date_stamp(), "2026-01-15");
    }

    #[test]
    fn parse_normalises_offsets_to_utc() {
        let ts = Timestamp::parse("2026-01-15T14:30:05+02:00").unwrap();
        assert_eq!(ts, fixed());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse("not a date").is_err());
    }

    #[test]
    fn serde_uses_canonical_string() {
        let json = serde_json::to_string(&fixed()).unwrap();
        assert_eq!(json, "\"2026-01-15T12:30:05Z\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fixed());
    }
}
