// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire records exchanged with the booking backend.
//!
//! The backend speaks `snake_case` field names with `start_time` /
//! `end_time` clock texts; the canonical [`Reservation`] type is
//! constructed from these exactly once, at this boundary.

use roombook_domain::{DomainError, Reservation};
use serde::{Deserialize, Serialize};

/// A reservation record as persisted by the remote backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedReservation {
    /// The remote-assigned identifier.
    pub id: i64,
    /// The meeting name.
    pub name: String,
    /// The organizing unit.
    pub unit: String,
    /// The calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// The start time (`HH:MM`).
    pub start_time: String,
    /// The end time (`HH:MM`).
    pub end_time: String,
    /// The participants.
    pub people: String,
    /// The reporter.
    pub reporter: String,
    /// The room identifier.
    pub place: String,
}

impl PersistedReservation {
    /// Converts the wire record into the canonical domain type.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted date/time texts are
    /// malformed or the window is inverted.
    pub fn into_reservation(self) -> Result<Reservation, DomainError> {
        Reservation::from_persisted(
            self.id,
            &self.name,
            &self.unit,
            &self.date,
            &self.start_time,
            &self.end_time,
            &self.people,
            &self.reporter,
            &self.place,
        )
    }
}

/// The mutable portion of a reservation submitted on create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationPayload {
    /// The meeting name.
    pub name: String,
    /// The organizing unit.
    pub unit: String,
    /// The calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// The start time (`HH:MM`).
    pub start_time: String,
    /// The end time (`HH:MM`).
    pub end_time: String,
    /// The participants.
    pub people: String,
    /// The reporter.
    pub reporter: String,
    /// The room identifier.
    pub place: String,
}

impl ReservationPayload {
    /// Builds the wire payload from a canonical reservation.
    #[must_use]
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            name: reservation.name.clone(),
            unit: reservation.unit.clone(),
            date: reservation.date_text(),
            start_time: reservation.start.text().to_string(),
            end_time: reservation.end.text().to_string(),
            people: reservation.people.clone(),
            reporter: reservation.reporter.clone(),
            place: reservation.place.clone(),
        }
    }
}

/// Parameters for the read-only range/substring search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Inclusive start date (`YYYY-MM-DD`).
    pub from: String,
    /// Inclusive end date (`YYYY-MM-DD`).
    pub to: String,
    /// Optional place substring filter.
    pub place: Option<String>,
    /// Optional keyword matched against name, unit, reporter, and
    /// place.
    pub keyword: Option<String>,
}
