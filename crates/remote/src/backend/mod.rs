// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking-backend contract and its implementations.

mod http;
mod memory;

pub use http::{HttpBackend, SessionProfile};
pub use memory::InMemoryBackend;

use crate::error::RemoteError;
use crate::record::{PersistedReservation, ReservationPayload, SearchQuery};
use async_trait::async_trait;

/// The remote booking contract consumed by the reservation store.
///
/// The remote is the system of record: it assigns identifiers,
/// enforces authorization, and persists every field except
/// attachments.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Fetches every persisted reservation.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Transport` when the remote is
    /// unreachable and `RemoteError::Auth` when the caller is
    /// unauthenticated.
    async fn list(&self) -> Result<Vec<PersistedReservation>, RemoteError>;

    /// Persists a new reservation and returns the remote-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Validation` for missing fields,
    /// `RemoteError::Auth` for unauthenticated callers, and
    /// `RemoteError::Transport` for remote failures.
    async fn create(&self, payload: &ReservationPayload) -> Result<i64, RemoteError>;

    /// Replaces the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::NotFound` when the id is absent, plus
    /// the failure modes of `create`.
    async fn update(&self, id: i64, payload: &ReservationPayload) -> Result<(), RemoteError>;

    /// Deletes the record with the given id.
    ///
    /// # Errors
    ///
    /// Same failure modes as `update`.
    async fn delete(&self, id: i64) -> Result<(), RemoteError>;

    /// Read-only date-range query with optional place/keyword
    /// substring filters.
    ///
    /// # Errors
    ///
    /// Same failure modes as `list`.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<PersistedReservation>, RemoteError>;
}
