// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod clock;
mod conflict;
mod error;
mod types;
mod views;

#[cfg(test)]
mod tests;

pub use clock::{ClockTime, parse_clock, parse_date, weekday_label};
pub use conflict::{BookingOutcome, BookingRejection, evaluate, find_conflicts};
pub use error::DomainError;
pub use types::{Attachment, Reservation, ReservationRequest};
pub use views::{
    DEFAULT_EARLY_WINDOW_MINUTES, DEFAULT_HORIZON_DAYS, active_rows, all_rows, not_yet_ended_rows,
    upcoming_rows,
};
