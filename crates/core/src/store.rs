// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The reservation store.
//!
//! The store exclusively owns the canonical in-memory reservation
//! set. Every mutation runs the conflict detector first and commits
//! locally only after the remote collaborator has confirmed:
//! pessimistic write ordering, so a remote failure can never leave a
//! phantom local booking and a retry race can never double-book.
//!
//! ## Invariants
//!
//! - The canonical set only ever contains records the remote has
//!   acknowledged (each carries a remote-assigned id).
//! - Reconciliation replaces the set wholesale; it never merges.
//!   A failed reconciliation leaves the previous set fully intact.
//! - Attachments live only in this cache. They survive reconciliation
//!   when the refreshed record matches on the content key and are
//!   dropped otherwise.

use crate::error::StoreError;
use chrono::{Duration, NaiveDateTime};
use roombook_domain::{
    Attachment, BookingOutcome, DEFAULT_EARLY_WINDOW_MINUTES, DEFAULT_HORIZON_DAYS, Reservation,
    ReservationRequest, active_rows, all_rows, evaluate, not_yet_ended_rows, upcoming_rows,
};
use roombook_remote::{BookingBackend, ReservationPayload, SearchQuery};
use std::collections::HashMap;
use tracing::{info, warn};

/// Tunable parameters for a reservation store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// The room universe, used to offer alternatives on conflict.
    pub rooms: Vec<String>,
    /// Lead time for pre-announcing meetings on the active view.
    pub early_window_minutes: i64,
    /// Horizon for the upcoming view.
    pub horizon_days: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            rooms: vec![
                String::from("2F Conference Room"),
                String::from("5F Conference Room"),
            ],
            early_window_minutes: DEFAULT_EARLY_WINDOW_MINUTES,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

/// The stateful orchestrator mediating all reservation mutations.
///
/// All operations take `&mut self`; the exclusive borrow is what
/// guarantees that no two validate-then-commit sequences interleave
/// within one process (callers share the store behind an async mutex).
#[derive(Debug)]
pub struct ReservationStore<B> {
    backend: B,
    config: StoreConfig,
    reservations: Vec<Reservation>,
}

impl<B: BookingBackend> ReservationStore<B> {
    /// Creates a store with an empty canonical set.
    pub const fn new(backend: B, config: StoreConfig) -> Self {
        Self {
            backend,
            config,
            reservations: Vec::new(),
        }
    }

    /// Returns a read-only snapshot of the canonical set.
    #[must_use]
    pub fn snapshot(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Returns the configured room universe.
    #[must_use]
    pub fn rooms(&self) -> &[String] {
        &self.config.rooms
    }

    /// Returns a reference to the remote backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Validates and submits a new reservation.
    ///
    /// On acceptance the remote-assigned id is merged into the record
    /// before it joins the canonical set. There is no optimistic
    /// insert: a rejection or remote failure leaves local state
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Rejected` with the detector's outcome, or
    /// `StoreError::Remote` when the backend refuses the write.
    pub async fn create(
        &mut self,
        request: &ReservationRequest,
        now: NaiveDateTime,
    ) -> Result<Reservation, StoreError> {
        let candidate: Reservation =
            match evaluate(request, &self.reservations, &self.config.rooms, now) {
                BookingOutcome::Accepted(candidate) => candidate,
                BookingOutcome::Rejected(rejection) => {
                    return Err(StoreError::Rejected(rejection));
                }
            };

        let payload: ReservationPayload = ReservationPayload::from_reservation(&candidate);
        let id: i64 = self.backend.create(&payload).await?;

        let mut committed: Reservation = candidate;
        committed.assign_id(id);
        info!(
            id,
            place = %committed.place,
            window = %committed.time_label(),
            "reservation committed"
        );
        self.reservations.push(committed.clone());
        Ok(committed)
    }

    /// Validates and submits an edit of an existing reservation.
    ///
    /// The conflict check excludes the reservation's own prior
    /// version. On success the record is replaced in place with its
    /// minute offsets and display label re-derived; the prior
    /// attachment cache is preserved unless the request supplies new
    /// attachments.
    ///
    /// # Errors
    ///
    /// As for [`ReservationStore::create`], plus
    /// `StoreError::MissingId` when the request carries no id and
    /// `StoreError::Remote(RemoteError::NotFound)` when the record
    /// has vanished remotely.
    pub async fn update(
        &mut self,
        request: &ReservationRequest,
        now: NaiveDateTime,
    ) -> Result<Reservation, StoreError> {
        let id: i64 = request.id.ok_or(StoreError::MissingId)?;

        let candidate: Reservation =
            match evaluate(request, &self.reservations, &self.config.rooms, now) {
                BookingOutcome::Accepted(candidate) => candidate,
                BookingOutcome::Rejected(rejection) => {
                    return Err(StoreError::Rejected(rejection));
                }
            };

        let payload: ReservationPayload = ReservationPayload::from_reservation(&candidate);
        self.backend.update(id, &payload).await?;

        let mut replacement: Reservation = candidate;
        if let Some(existing) = self.reservations.iter_mut().find(|r| r.id() == Some(id)) {
            if replacement.attachments.is_empty() {
                replacement.attachments = existing.attachments.clone();
            }
            *existing = replacement.clone();
        } else {
            // Known remotely but not locally; adopt it now rather than
            // waiting for the next reconciliation pass.
            self.reservations.push(replacement.clone());
        }
        info!(id, window = %replacement.time_label(), "reservation updated");
        Ok(replacement)
    }

    /// Deletes a reservation.
    ///
    /// The remote is asked first; the local record is removed only on
    /// acknowledgment. A stale local-only deletion would resurrect on
    /// the next reconciliation pass, so there is no optimistic path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Remote` when the backend refuses,
    /// including `NotFound` for an id no longer present remotely.
    pub async fn remove(&mut self, id: i64) -> Result<(), StoreError> {
        self.backend.delete(id).await?;
        self.reservations.retain(|r| r.id() != Some(id));
        info!(id, "reservation removed");
        Ok(())
    }

    /// Replaces the canonical set with the remote's authoritative
    /// records.
    ///
    /// Locally cached attachments are re-associated to refreshed
    /// records via the content key; records the remote no longer
    /// returns lose their cache. Wire records that fail to parse are
    /// skipped with a warning rather than poisoning the refresh.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Remote` when the listing fails; the
    /// previous canonical set is left fully intact
    /// (stale-but-consistent beats empty-but-fresh).
    pub async fn reconcile(&mut self) -> Result<(), StoreError> {
        let records = self.backend.list().await?;

        let mut cache: HashMap<String, Vec<Attachment>> = self
            .reservations
            .iter()
            .filter(|r| !r.attachments.is_empty())
            .map(|r| (r.attachment_key(), r.attachments.clone()))
            .collect();

        let mut refreshed: Vec<Reservation> = Vec::with_capacity(records.len());
        for record in records {
            let id: i64 = record.id;
            match record.into_reservation() {
                Ok(mut reservation) => {
                    if let Some(attachments) = cache.remove(&reservation.attachment_key()) {
                        reservation.attachments = attachments;
                    }
                    refreshed.push(reservation);
                }
                Err(err) => warn!(id, %err, "skipping malformed remote record"),
            }
        }

        info!(count = refreshed.len(), "canonical set reconciled");
        self.reservations = refreshed;
        Ok(())
    }

    /// Runs a read-only range/keyword search against the remote.
    ///
    /// Results are converted to the canonical type but never enter
    /// the canonical set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Remote` when the query fails.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Reservation>, StoreError> {
        let records = self.backend.search(query).await?;
        let mut hits: Vec<Reservation> = Vec::with_capacity(records.len());
        for record in records {
            let id: i64 = record.id;
            match record.into_reservation() {
                Ok(reservation) => hits.push(reservation),
                Err(err) => warn!(id, %err, "skipping malformed search hit"),
            }
        }
        Ok(hits)
    }

    /// Every reservation, sorted. The admin view.
    #[must_use]
    pub fn admin_rows(&self) -> Vec<Reservation> {
        all_rows(&self.reservations)
    }

    /// Reservations showing on a display board at `now`, including
    /// those within the configured early window before their start.
    #[must_use]
    pub fn active_rows(&self, now: NaiveDateTime) -> Vec<Reservation> {
        active_rows(
            &self.reservations,
            now,
            Duration::minutes(self.config.early_window_minutes),
        )
    }

    /// Reservations not yet ended and starting within the configured
    /// horizon.
    #[must_use]
    pub fn upcoming_rows(&self, now: NaiveDateTime) -> Vec<Reservation> {
        upcoming_rows(
            &self.reservations,
            now,
            Duration::days(self.config.horizon_days),
        )
    }

    /// Reservations still eligible for edit/delete at `now`.
    #[must_use]
    pub fn editable_rows(&self, now: NaiveDateTime) -> Vec<Reservation> {
        not_yet_ended_rows(&self.reservations, now)
    }
}
