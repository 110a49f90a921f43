// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Background timers.
//!
//! No push-based change notification exists in the external system,
//! so the canonical set is kept fresh by periodic polling; up to one
//! polling interval of staleness is acceptable. The "now" reference
//! used by view projection is refreshed on its own independent timer
//! and is frozen for the duration of any single projection call.

use crate::store::ReservationStore;
use chrono::{Local, NaiveDateTime};
use roombook_remote::BookingBackend;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

/// Default reconciliation polling period.
pub const DEFAULT_RECONCILE_SECS: u64 = 10;

/// Default refresh period for the shared "now" reference.
pub const DEFAULT_NOW_REFRESH_SECS: u64 = 10;

/// Spawns the periodic reconciliation task.
///
/// The first tick fires immediately, giving the store its initial
/// load. Failures are logged and retried on the next tick; the
/// canonical set is untouched across a failed pass. Aborting the
/// returned handle is the only cancellation mechanism; an in-flight
/// remote call is never interrupted mid-operation.
pub fn spawn_reconciler<B>(
    store: Arc<Mutex<ReservationStore<B>>>,
    period: Duration,
) -> JoinHandle<()>
where
    B: BookingBackend + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let mut store = store.lock().await;
            if let Err(err) = store.reconcile().await {
                warn!(%err, "reconciliation failed; keeping previous canonical set");
            }
        }
    })
}

/// A periodically refreshed "now" reference.
///
/// Cheap to clone and share; readers get the same frozen instant
/// until the next refresh, keeping classifications within one
/// projection pass internally consistent.
#[derive(Debug, Clone)]
pub struct SharedNow {
    inner: Arc<RwLock<NaiveDateTime>>,
}

impl SharedNow {
    /// Creates a reference starting at the current host-local time.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Local::now().naive_local())
    }

    /// Creates a reference frozen at a given instant (tests).
    #[must_use]
    pub fn starting_at(now: NaiveDateTime) -> Self {
        Self {
            inner: Arc::new(RwLock::new(now)),
        }
    }

    /// Returns the current frozen instant.
    #[must_use]
    pub fn get(&self) -> NaiveDateTime {
        *self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-freezes the reference at the current host-local time.
    pub fn refresh(&self) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Local::now().naive_local();
    }
}

impl Default for SharedNow {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the independent "now" refresh task.
pub fn spawn_now_refresher(now: SharedNow, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            now.refresh();
        }
    })
}
