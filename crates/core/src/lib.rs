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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod schedule;
mod store;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use schedule::{
    DEFAULT_NOW_REFRESH_SECS, DEFAULT_RECONCILE_SECS, SharedNow, spawn_now_refresher,
    spawn_reconciler,
};
pub use store::{ReservationStore, StoreConfig};
