// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking-conflict detection.
//!
//! `evaluate` is a pure check: it never mutates state, never performs
//! I/O, and never returns `Err`. Rejection is data, so callers (and
//! UI layers previewing a booking) handle the failure path explicitly
//! instead of via exception control flow.
//!
//! ## Invariants
//!
//! - Windows are half-open `[start, end)`: a reservation ending
//!   exactly when another begins does not conflict.
//! - Only live reservations (end instant strictly after `now`)
//!   participate in the overlap scan. An ended reservation is an
//!   immediate all-clear for its slot, permitting back-to-back
//!   reservations with zero gap.
//! - When the candidate carries an id (editing), the existing record
//!   with that id is excluded from the scan.

use crate::error::DomainError;
use crate::types::{Reservation, ReservationRequest};
use chrono::NaiveDateTime;

/// The outcome of evaluating a booking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The request passed every check; carries the parsed candidate
    /// ready for submission. No side effect has occurred.
    Accepted(Reservation),
    /// The request was rejected; carries the reason and, for
    /// conflicts, remediation data for user display.
    Rejected(BookingRejection),
}

impl BookingOutcome {
    /// Whether the outcome is an acceptance.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// The distinct rejection kinds, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    /// A required field was empty.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// The date text did not parse.
    MalformedDate {
        /// The text that failed to parse.
        text: String,
    },
    /// A clock text did not parse to a valid minute offset.
    MalformedClock {
        /// The text that failed to parse.
        text: String,
    },
    /// The requested slot has already ended.
    SlotEnded,
    /// The requested slot has already started (booking "now" is
    /// intentionally forbidden).
    SlotUnderway,
    /// The window is zero-length or inverted.
    EmptyWindow {
        /// The start clock text.
        start: String,
        /// The end clock text.
        end: String,
    },
    /// The room is already reserved for an overlapping window.
    Conflict {
        /// The live reservations that overlap the candidate.
        conflicts: Vec<Reservation>,
        /// The other rooms in the universe, offered as alternatives.
        /// A convenience for steering the user, not a hold on any room.
        alternatives: Vec<String>,
    },
}

impl std::fmt::Display for BookingRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "Required field '{field}' is empty")
            }
            Self::MalformedDate { text } => {
                write!(f, "Malformed date '{text}': expected YYYY-MM-DD")
            }
            Self::MalformedClock { text } => {
                write!(f, "Malformed time '{text}': expected HH:MM")
            }
            Self::SlotEnded => {
                write!(f, "This slot has already ended and cannot be reserved")
            }
            Self::SlotUnderway => {
                write!(f, "The start time has already passed")
            }
            Self::EmptyWindow { start, end } => {
                write!(f, "End time {end} must be after start time {start}")
            }
            Self::Conflict { conflicts, .. } => {
                write!(
                    f,
                    "The room already has {} overlapping reservation(s) in this slot",
                    conflicts.len()
                )
            }
        }
    }
}

impl From<DomainError> for BookingRejection {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MalformedDate { text } => Self::MalformedDate { text },
            DomainError::MalformedClock { text } => Self::MalformedClock { text },
            DomainError::EmptyWindow { start, end } => Self::EmptyWindow { start, end },
            DomainError::MissingField { field } => Self::MissingField { field },
        }
    }
}

/// Evaluates a booking request against the current reservation set.
///
/// Checks short-circuit at the first failure, each with a distinct
/// rejection kind:
///
/// 1. required fields present and date/time texts parse (hoisted
///    ahead of the instant checks: no instant can be formed from
///    malformed text)
/// 2. end instant strictly after `now`
/// 3. start instant strictly after `now`
/// 4. `end` minute strictly after `start` minute
/// 5. overlap scan against live same-date, same-room reservations,
///    excluding the candidate's own id when editing
///
/// `rooms` is the room universe used to offer alternatives on
/// conflict.
#[must_use]
pub fn evaluate(
    request: &ReservationRequest,
    existing: &[Reservation],
    rooms: &[String],
    now: NaiveDateTime,
) -> BookingOutcome {
    let candidate: Reservation = match request.parse() {
        Ok(candidate) => candidate,
        Err(err) => return BookingOutcome::Rejected(err.into()),
    };

    if candidate.end_at() <= now {
        return BookingOutcome::Rejected(BookingRejection::SlotEnded);
    }
    if candidate.start_at() <= now {
        return BookingOutcome::Rejected(BookingRejection::SlotUnderway);
    }
    if candidate.end.minute() <= candidate.start.minute() {
        return BookingOutcome::Rejected(BookingRejection::EmptyWindow {
            start: candidate.start.text().to_string(),
            end: candidate.end.text().to_string(),
        });
    }

    let conflicts: Vec<Reservation> = find_conflicts(&candidate, existing, now);
    if !conflicts.is_empty() {
        let alternatives: Vec<String> = rooms
            .iter()
            .filter(|room| room.as_str() != candidate.place)
            .cloned()
            .collect();
        return BookingOutcome::Rejected(BookingRejection::Conflict {
            conflicts,
            alternatives,
        });
    }

    BookingOutcome::Accepted(candidate)
}

/// Returns every live reservation whose window overlaps the candidate
/// on the same date and in the same room.
///
/// Overlap is the half-open interval test
/// `candidate.start < other.end && other.start < candidate.end`.
#[must_use]
pub fn find_conflicts(
    candidate: &Reservation,
    existing: &[Reservation],
    now: NaiveDateTime,
) -> Vec<Reservation> {
    existing
        .iter()
        .filter(|other| other.date == candidate.date)
        .filter(|other| other.place == candidate.place)
        // Edit self-exclusion: the prior version of the record being
        // edited never conflicts with its replacement.
        .filter(|other| candidate.id().is_none() || other.id() != candidate.id())
        .filter(|other| other.is_live(now))
        .filter(|other| {
            candidate.start.minute() < other.end.minute()
                && other.start.minute() < candidate.end.minute()
        })
        .cloned()
        .collect()
}
