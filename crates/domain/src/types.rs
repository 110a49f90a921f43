// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::clock::{ClockTime, parse_clock, parse_date};
use crate::error::DomainError;
use chrono::{NaiveDate, NaiveDateTime};

/// A binary attachment cached locally against a reservation.
///
/// Attachments are never persisted by the remote collaborator. After
/// each reconciliation pass they are re-associated to the refreshed
/// records via the content key (see [`Reservation::attachment_key`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// The original file name.
    pub file_name: String,
    /// The media type (e.g. `application/pdf`).
    pub media_type: String,
    /// The content size in bytes.
    pub size: u64,
    /// The raw content.
    pub content: Vec<u8>,
}

/// A raw reservation request as received from a caller.
///
/// All time fields are unvalidated strings. [`ReservationRequest::parse`]
/// is the single boundary where they become the canonical
/// [`Reservation`] type; nothing downstream handles raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationRequest {
    /// The existing reservation id when editing; `None` when creating.
    pub id: Option<i64>,
    /// The meeting name.
    pub name: String,
    /// The organizing unit.
    pub unit: String,
    /// The calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// The start time (`HH:MM`).
    pub start: String,
    /// The end time (`HH:MM`).
    pub end: String,
    /// The participants.
    pub people: String,
    /// The reporter.
    pub reporter: String,
    /// The room identifier.
    pub place: String,
    /// Attachments to cache locally. Empty on update means
    /// "keep whatever was already cached".
    pub attachments: Vec<Attachment>,
}

impl ReservationRequest {
    /// Parses the request into a canonical [`Reservation`].
    ///
    /// Minute offsets are derived here, once; the window inversion
    /// check (`end > start`) is deliberately NOT performed here so the
    /// conflict detector can report it as its own rejection kind.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is empty or a date/time
    /// field is malformed.
    pub fn parse(&self) -> Result<Reservation, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::MissingField { field: "name" });
        }
        if self.place.trim().is_empty() {
            return Err(DomainError::MissingField { field: "place" });
        }

        let date: NaiveDate = parse_date(&self.date)?;
        let start: ClockTime = ClockTime::parse(&self.start)?;
        let end: ClockTime = ClockTime::parse(&self.end)?;

        Ok(Reservation {
            id: self.id,
            name: self.name.clone(),
            unit: self.unit.clone(),
            date,
            start,
            end,
            people: self.people.clone(),
            reporter: self.reporter.clone(),
            place: self.place.trim().to_string(),
            attachments: self.attachments.clone(),
        })
    }
}

/// The canonical reservation entity.
///
/// Constructed only at system boundaries (request parsing, wire record
/// conversion); minute offsets and display texts are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// The remote-assigned identifier. `None` until the remote
    /// collaborator accepts the reservation; the remote id always
    /// wins over any local placeholder.
    id: Option<i64>,
    /// The meeting name.
    pub name: String,
    /// The organizing unit.
    pub unit: String,
    /// The calendar date.
    pub date: NaiveDate,
    /// The start time of day.
    pub start: ClockTime,
    /// The end time of day.
    pub end: ClockTime,
    /// The participants.
    pub people: String,
    /// The reporter.
    pub reporter: String,
    /// The room identifier (trimmed).
    pub place: String,
    /// Locally cached attachments.
    pub attachments: Vec<Attachment>,
}

impl Reservation {
    /// Constructs a reservation from already-persisted field texts.
    ///
    /// This is the boundary used when converting remote wire records.
    ///
    /// # Errors
    ///
    /// Returns an error if the date or time texts are malformed or
    /// the window is inverted (a persisted record must satisfy every
    /// invariant the conflict detector enforces on entry).
    pub fn from_persisted(
        id: i64,
        name: &str,
        unit: &str,
        date: &str,
        start: &str,
        end: &str,
        people: &str,
        reporter: &str,
        place: &str,
    ) -> Result<Self, DomainError> {
        let start_minute: u16 = parse_clock(start)?;
        let end_minute: u16 = parse_clock(end)?;
        if end_minute <= start_minute {
            return Err(DomainError::EmptyWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self {
            id: Some(id),
            name: name.to_string(),
            unit: unit.to_string(),
            date: parse_date(date)?,
            start: ClockTime::parse(start)?,
            end: ClockTime::parse(end)?,
            people: people.to_string(),
            reporter: reporter.to_string(),
            place: place.trim().to_string(),
            attachments: Vec::new(),
        })
    }

    /// Returns the remote-assigned identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        self.id
    }

    /// Merges the remote-assigned identifier into this record.
    pub const fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    /// Returns the start instant (naive local).
    #[must_use]
    pub fn start_at(&self) -> NaiveDateTime {
        self.start.on(self.date)
    }

    /// Returns the end instant (naive local).
    #[must_use]
    pub fn end_at(&self) -> NaiveDateTime {
        self.end.on(self.date)
    }

    /// Whether the reservation's end instant is strictly after `now`.
    #[must_use]
    pub fn is_live(&self, now: NaiveDateTime) -> bool {
        self.end_at() > now
    }

    /// Returns the `HH:MM~HH:MM` display label.
    #[must_use]
    pub fn time_label(&self) -> String {
        format!("{}~{}", self.start, self.end)
    }

    /// Returns the date as its `YYYY-MM-DD` display text.
    #[must_use]
    pub fn date_text(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Returns the content-derived key used to re-associate cached
    /// attachments after reconciliation.
    ///
    /// The remote store does not retain attachments, so identity
    /// across a refresh is approximated by content: any field
    /// difference drops the cache.
    #[must_use]
    pub fn attachment_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.date_text(),
            self.start,
            self.end,
            self.place,
            self.name
        )
    }
}
