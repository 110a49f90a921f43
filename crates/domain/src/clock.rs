// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wall-clock parsing and instant construction.
//!
//! Reservations carry their times as zero-padded display strings
//! (`HH:MM`) and as derived minute-of-day offsets. This module is the
//! only place those representations are produced.
//!
//! ## Invariants
//!
//! - Clock strings are strict `HH:MM` with `0 <= HH <= 23` and
//!   `0 <= MM <= 59`; nothing else parses.
//! - Date strings are strict zero-padded `YYYY-MM-DD`.
//! - Instants are naive local datetimes. The reference "now" is taken
//!   from the host-local clock everywhere; UTC and local
//!   interpretations are never mixed for the same value.

use crate::error::DomainError;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Parses a strict `HH:MM` clock string into a minute-of-day offset.
///
/// # Errors
///
/// Returns `DomainError::MalformedClock` if the text does not match
/// the `HH:MM` pattern, the hour exceeds 23, or the minute exceeds 59.
pub fn parse_clock(text: &str) -> Result<u16, DomainError> {
    let malformed = || DomainError::MalformedClock {
        text: text.to_string(),
    };

    let bytes: &[u8] = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(malformed());
    }
    if ![0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit()) {
        return Err(malformed());
    }

    let hour: u16 = u16::from(bytes[0] - b'0') * 10 + u16::from(bytes[1] - b'0');
    let minute: u16 = u16::from(bytes[3] - b'0') * 10 + u16::from(bytes[4] - b'0');
    if hour > 23 || minute > 59 {
        return Err(malformed());
    }

    Ok(hour * 60 + minute)
}

/// Parses a strict zero-padded `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns `DomainError::MalformedDate` on pattern mismatch or an
/// impossible calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, DomainError> {
    let malformed = || DomainError::MalformedDate {
        text: text.to_string(),
    };

    let bytes: &[u8] = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(malformed());
    }
    if ![0, 1, 2, 3, 5, 6, 8, 9]
        .iter()
        .all(|&i| bytes[i].is_ascii_digit())
    {
        return Err(malformed());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| malformed())
}

/// Returns a short weekday label for a date.
///
/// Presentation only; never used in comparison logic.
#[must_use]
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// A wall-clock time of day at minute granularity.
///
/// Carries both the zero-padded `HH:MM` display text and the derived
/// minute-of-day offset, computed once at construction. Zero-padding
/// is a correctness requirement: the display form must sort
/// lexicographically in the same order as the minute offset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime {
    /// The minute-of-day offset (0..=1439).
    minute: u16,
    /// The zero-padded `HH:MM` display text.
    text: String,
}

impl ClockTime {
    /// Parses a strict `HH:MM` clock string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedClock` for any text that
    /// `parse_clock` rejects.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let minute: u16 = parse_clock(text)?;
        Ok(Self {
            minute,
            text: text.to_string(),
        })
    }

    /// Returns the minute-of-day offset.
    #[must_use]
    pub const fn minute(&self) -> u16 {
        self.minute
    }

    /// Returns the zero-padded `HH:MM` display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Combines this clock time with a calendar date into a precise
    /// instant (naive local, zero seconds).
    #[must_use]
    pub fn on(&self, date: NaiveDate) -> NaiveDateTime {
        // minute < 1440 by construction, so the fallback is unreachable
        let time: NaiveTime =
            NaiveTime::from_num_seconds_from_midnight_opt(u32::from(self.minute) * 60, 0)
                .unwrap_or(NaiveTime::MIN);
        date.and_time(time)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.text
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_valid() {
        assert_eq!(parse_clock("00:00").unwrap(), 0);
        assert_eq!(parse_clock("08:30").unwrap(), 510);
        assert_eq!(parse_clock("23:59").unwrap(), 1439);
    }

    #[test]
    fn test_parse_clock_rejects_out_of_range() {
        assert!(parse_clock("24:00").is_err());
        assert!(parse_clock("10:60").is_err());
        assert!(parse_clock("99:99").is_err());
    }

    #[test]
    fn test_parse_clock_rejects_pattern_mismatch() {
        assert!(parse_clock("8:30").is_err());
        assert!(parse_clock("08:3").is_err());
        assert!(parse_clock("0830").is_err());
        assert!(parse_clock("08-30").is_err());
        assert!(parse_clock("ab:cd").is_err());
        assert!(parse_clock("").is_err());
    }

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date("2024-01-10").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_parse_date_rejects_unpadded() {
        assert!(parse_date("2024-1-10").is_err());
        assert!(parse_date("2024-01-1").is_err());
    }

    #[test]
    fn test_parse_date_rejects_impossible_date() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_clock_time_on_date() {
        let clock = ClockTime::parse("10:05").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let instant = clock.on(date);
        assert_eq!(
            instant,
            NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(10, 5, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_clock_time_ordering_matches_text_ordering() {
        let early = ClockTime::parse("08:00").unwrap();
        let late = ClockTime::parse("13:30").unwrap();
        assert!(early < late);
        assert!(early.text() < late.text());
    }

    #[test]
    fn test_weekday_label() {
        // 2024-01-10 was a Wednesday
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(weekday_label(date), "Wed");
    }
}
