// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! View projection over the canonical reservation set.
//!
//! Four derivations, all pure functions of `(set, now)`. None mutate,
//! none perform I/O, and a frozen `now` guarantees internally
//! consistent classification within one call. All four sort by
//! `(date, start minute)` ascending, the typed equivalent of the
//! zero-padded lexicographic sort on the display strings.

use crate::types::Reservation;
use chrono::{Duration, NaiveDateTime};

/// Default lead time for pre-announcing an upcoming meeting.
pub const DEFAULT_EARLY_WINDOW_MINUTES: i64 = 15;

/// Default horizon for the upcoming view.
pub const DEFAULT_HORIZON_DAYS: i64 = 7;

fn sorted(mut rows: Vec<Reservation>) -> Vec<Reservation> {
    rows.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.start.minute().cmp(&b.start.minute()))
    });
    rows
}

/// Every reservation, sorted. The admin view.
#[must_use]
pub fn all_rows(set: &[Reservation]) -> Vec<Reservation> {
    sorted(set.to_vec())
}

/// Reservations currently showing on a display board.
///
/// A reservation shows from `start - early_window` (so a board can
/// pre-announce it) until its end: `show_from <= now < end`.
#[must_use]
pub fn active_rows(
    set: &[Reservation],
    now: NaiveDateTime,
    early_window: Duration,
) -> Vec<Reservation> {
    sorted(
        set.iter()
            .filter(|r| {
                let show_from: NaiveDateTime = r.start_at() - early_window;
                show_from <= now && now < r.end_at()
            })
            .cloned()
            .collect(),
    )
}

/// Reservations not yet ended and starting within the horizon.
#[must_use]
pub fn upcoming_rows(set: &[Reservation], now: NaiveDateTime, horizon: Duration) -> Vec<Reservation> {
    let until: NaiveDateTime = now + horizon;
    sorted(
        set.iter()
            .filter(|r| r.is_live(now) && r.start_at() <= until)
            .cloned()
            .collect(),
    )
}

/// Reservations not yet ended, irrespective of how far in the future.
///
/// Edit/delete eligibility: a reservation is immutable once ended.
#[must_use]
pub fn not_yet_ended_rows(set: &[Reservation], now: NaiveDateTime) -> Vec<Reservation> {
    sorted(set.iter().filter(|r| r.is_live(now)).cloned().collect())
}
