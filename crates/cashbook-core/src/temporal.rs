//! Raw date encodings and their normalization.
//!
//! The record collections come from several write paths that never agreed
//! on a date encoding: some store a structured timestamp, some an epoch
//! number, some a text date. [`RawDate`] enumerates every encoding found
//! in the store, and [`RawDate::normalize`] decodes it into a canonical
//! UTC instant exactly once. No other module inspects encodings.
//!
//! A value that cannot be decoded is not an error: callers treat it as a
//! data-quality problem and skip the record.
//!
//! # Examples
//!
//! ```
//! use cashbook_core::RawDate;
//!
//! let stored = RawDate::Timestamp { seconds: 1_709_600_000, nanos: 0 };
//! let instant = stored.normalize().unwrap();
//! assert_eq!(instant.to_rfc3339(), "2024-03-05T00:53:20+00:00");
//!
//! assert!(RawDate::Text("not a date".into()).normalize().is_none());
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored date in whatever encoding its write path used.
///
/// Deserialization is untagged, so values decode straight out of the
/// document store: a `{seconds, nanoseconds}` map becomes
/// [`Timestamp`](Self::Timestamp), an RFC 3339 string becomes
/// [`Instant`](Self::Instant), a bare integer becomes
/// [`EpochMillis`](Self::EpochMillis), and any other string is kept as
/// [`Text`](Self::Text) for `normalize` to attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// Structured document-store timestamp split into seconds and nanoseconds.
    Timestamp {
        /// Seconds since the Unix epoch.
        seconds: i64,
        /// Sub-second component.
        #[serde(default, alias = "nanoseconds")]
        nanos: u32,
    },
    /// An already-decoded instant.
    Instant(DateTime<Utc>),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// A textual date, hopefully ISO 8601.
    Text(String),
}

impl RawDate {
    /// Decode this raw value into a canonical UTC instant.
    ///
    /// Returns `None` for out-of-range epochs and unparseable text. This
    /// function is pure and never panics; it is the only place in the
    /// workspace that interprets date encodings.
    #[must_use]
    pub fn normalize(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp { seconds, nanos } => DateTime::from_timestamp(*seconds, *nanos),
            Self::Instant(instant) => Some(*instant),
            Self::EpochMillis(millis) => DateTime::from_timestamp_millis(*millis),
            Self::Text(text) => parse_text(text),
        }
    }
}

impl From<DateTime<Utc>> for RawDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::Instant(instant)
    }
}

/// Parse a textual date, trying the formats seen in the store.
fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// A requested reporting period cannot be represented.
///
/// This is caller misuse, the only condition in the engine that raises:
/// months are 0-indexed and the year must be representable by the
/// calendar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The 0-indexed month was outside `0..=11`.
    #[error("month index out of range: {month} (expected 0..=11)")]
    MonthOutOfRange {
        /// The offending month index.
        month: u32,
    },
    /// The year is outside the representable calendar range.
    #[error("year out of range: {year}")]
    YearOutOfRange {
        /// The offending year.
        year: i32,
    },
}

/// The half-open UTC window `[start, end)` of one calendar month.
///
/// Both the ledger generator (membership) and the opening-balance
/// calculator (cutoff) derive their boundaries from this type, so month
/// arithmetic and period validation exist exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl MonthWindow {
    /// Build the window for `(year, month0)` with a 0-indexed month.
    pub fn new(year: i32, month0: u32) -> Result<Self, PeriodError> {
        if month0 > 11 {
            return Err(PeriodError::MonthOutOfRange { month: month0 });
        }
        let start = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
            .ok_or(PeriodError::YearOutOfRange { year })?;
        let end = if month0 == 11 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
                .ok_or(PeriodError::YearOutOfRange { year: year + 1 })?
        } else {
            NaiveDate::from_ymd_opt(year, month0 + 2, 1)
                .ok_or(PeriodError::YearOutOfRange { year })?
        };
        Ok(Self {
            start: start.and_time(NaiveTime::MIN).and_utc(),
            end: end.and_time(NaiveTime::MIN).and_utc(),
        })
    }

    /// First instant of the month.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// First instant of the following month.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` falls inside the month.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether `instant` is strictly before the month starts.
    ///
    /// This is the opening-balance cutoff: carried-forward history is
    /// everything before the first instant of the month.
    #[must_use]
    pub fn precedes(&self, instant: DateTime<Utc>) -> bool {
        instant < self.start
    }
}
