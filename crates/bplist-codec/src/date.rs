//! Absolute point-in-time value for plist trees.

/// Milliseconds between the Unix epoch (1970-01-01T00:00:00Z) and the
/// Apple plist epoch (2001-01-01T00:00:00Z).
pub const APPLE_EPOCH_UNIX_MILLIS: i64 = 978_307_200_000;

/// An absolute point in time with millisecond precision.
///
/// Stored as signed milliseconds since the Unix epoch. The binary plist
/// wire format carries dates as big-endian `f64` seconds since the Apple
/// epoch (2001-01-01T00:00:00Z); the conversions below round to the
/// nearest millisecond, so any date constructed from millis round-trips
/// through the wire form exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlistDate {
    unix_millis: i64,
}

impl PlistDate {
    /// Creates a date from milliseconds since the Unix epoch.
    pub fn from_unix_millis(unix_millis: i64) -> Self {
        Self { unix_millis }
    }

    /// Creates a date from (possibly fractional) seconds since the Unix
    /// epoch, rounded to the nearest millisecond.
    pub fn from_unix_seconds(seconds: f64) -> Self {
        Self {
            unix_millis: (seconds * 1000.0).round() as i64,
        }
    }

    /// Creates a date from (possibly fractional) seconds since the Apple
    /// epoch, rounded to the nearest millisecond.
    pub fn from_apple_seconds(seconds: f64) -> Self {
        Self {
            unix_millis: (seconds * 1000.0).round() as i64 + APPLE_EPOCH_UNIX_MILLIS,
        }
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(&self) -> i64 {
        self.unix_millis
    }

    /// Seconds since the Unix epoch, with the fractional part intact.
    pub fn unix_seconds(&self) -> f64 {
        self.unix_millis as f64 / 1000.0
    }

    /// Seconds since the Apple epoch, the wire representation.
    pub fn apple_seconds(&self) -> f64 {
        (self.unix_millis - APPLE_EPOCH_UNIX_MILLIS) as f64 / 1000.0
    }
}
