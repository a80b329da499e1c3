//! Fixed one-hour booking slots and the business-hours window.
//!
//! A slot is identified by its start time alone. The end is always derived
//! as start plus one hour and is never stored independently.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::reservation::ValidationError;

/// Length of every slot, in minutes.
pub const SLOT_MINUTES: i64 = 60;

const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"];

const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A one-hour booking interval identified by its start.
///
/// # Examples
///
/// ```
/// use slotbook::Slot;
///
/// let slot: Slot = "2030-01-07T10:00".parse().unwrap();
/// assert_eq!(slot.to_string(), "2030-01-07T10:00");
/// assert_eq!(slot.end().to_string(), "2030-01-07T11:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(NaiveDateTime);

impl Slot {
    /// Creates a slot starting at `start`.
    #[must_use]
    pub const fn new(start: NaiveDateTime) -> Self {
        Self(start)
    }

    /// Parses an ISO-8601 date-time that starts on the hour.
    ///
    /// Accepts the forms described in [`parse_instant`]. The start must have
    /// zero minutes and seconds, and the slot must end within the range of
    /// representable date-times.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the text is not a date-time, is not
    /// on the hour, or has no representable end.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let start = parse_instant(text)?;
        if start.minute() != 0 || start.second() != 0 || start.nanosecond() != 0 {
            return Err(ValidationError {
                field: "slot".into(),
                message: format!("'{text}' does not start on the hour"),
            });
        }
        if start.checked_add_signed(slot_length()).is_none() {
            return Err(ValidationError {
                field: "slot".into(),
                message: format!("'{text}' is too far in the future"),
            });
        }
        Ok(Self(start))
    }

    /// The slot start.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.0
    }

    /// The slot end, always one hour after the start.
    ///
    /// Saturates at the largest representable date-time; [`Slot::parse`]
    /// never yields a slot that reaches it.
    #[must_use]
    pub fn end(&self) -> Self {
        Self(
            self.0
                .checked_add_signed(slot_length())
                .unwrap_or(NaiveDateTime::MAX),
        )
    }

    /// Time of day of the slot start.
    #[must_use]
    pub fn time_of_day(&self) -> NaiveTime {
        self.0.time()
    }

    /// Whether `at` falls inside this slot, both ends inclusive.
    #[must_use]
    pub fn covers(&self, at: NaiveDateTime) -> bool {
        self.0 <= at && at <= self.end().0
    }

    /// Seconds since the Unix epoch, treating the slot as UTC.
    #[must_use]
    pub fn unix_secs(&self) -> i64 {
        self.0.and_utc().timestamp()
    }

    /// Rebuilds a slot from stored Unix seconds.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the value is out of range.
    pub fn from_unix_secs(secs: i64) -> Result<Self, ValidationError> {
        DateTime::from_timestamp(secs, 0)
            .map(|dt| Self(dt.naive_utc()))
            .ok_or_else(|| ValidationError {
                field: "slot".into(),
                message: format!("timestamp {secs} is out of range"),
            })
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl FromStr for Slot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for Slot {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// The daily window in which availability may be queried.
///
/// Both ends are inclusive and compare the full time of day, so with the
/// default 09:00–18:00 window a slot at 18:00 is accepted and 18:30 is not.
///
/// # Examples
///
/// ```
/// use slotbook::{BusinessHours, Slot};
///
/// let hours = BusinessHours::default();
/// assert!(hours.contains(&"2030-01-07T18:00".parse::<Slot>().unwrap()));
/// assert!(!hours.contains(&"2030-01-07T08:00".parse::<Slot>().unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    /// Earliest allowed slot start.
    pub start: NaiveTime,
    /// Latest allowed slot start.
    pub end: NaiveTime,
}

impl BusinessHours {
    /// Creates a window from `start` to `end`, inclusive.
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Whether the slot start lies within the window.
    #[must_use]
    pub fn contains(&self, slot: &Slot) -> bool {
        let t = slot.time_of_day();
        self.start <= t && t <= self.end
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

fn slot_length() -> TimeDelta {
    TimeDelta::minutes(SLOT_MINUTES)
}

/// Parses an ISO-8601 instant.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]` with either `T` or a space as
/// separator. Offsets (`Z`, `+02:00`) are accepted and normalized to UTC.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the text is not a date-time.
pub fn parse_instant(text: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = text.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_utc());
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
        .map(|with_offset| with_offset.naive_utc())
        .or_else(|| {
            ACCEPTED_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        })
        .ok_or_else(|| ValidationError {
            field: "slot".into(),
            message: format!("'{text}' is not an ISO-8601 date-time"),
        })
}

/// Parses an `HH:MM` time of day.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming `field` when the text is malformed.
pub fn parse_time_of_day(field: &str, text: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text.trim(), "%H:%M:%S"))
        .map_err(|_| ValidationError {
            field: field.into(),
            message: format!("'{text}' is not a time of day (expected HH:MM)"),
        })
}
