// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory booking backend.
//!
//! Implements the same contract as the HTTP backend against a plain
//! vector. Used by store tests and by local development; `set_offline`
//! simulates an unreachable remote.

use crate::backend::BookingBackend;
use crate::error::RemoteError;
use crate::record::{PersistedReservation, ReservationPayload, SearchQuery};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    records: Vec<PersistedReservation>,
    next_id: i64,
    offline: bool,
}

/// A booking backend backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    inner: Mutex<Inner>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with records. `next_id` starts
    /// past the highest seeded id.
    #[must_use]
    pub fn with_records(records: Vec<PersistedReservation>) -> Self {
        let next_id: i64 = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                records,
                next_id,
                offline: false,
            }),
        }
    }

    /// Simulates the remote becoming unreachable (or reachable again).
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Returns a snapshot of the persisted records.
    #[must_use]
    pub fn records(&self) -> Vec<PersistedReservation> {
        self.lock().records.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn offline_error() -> RemoteError {
    RemoteError::Transport {
        message: String::from("backend offline"),
    }
}

fn validate(payload: &ReservationPayload) -> Result<(), RemoteError> {
    for (field, value) in [
        ("name", &payload.name),
        ("date", &payload.date),
        ("start_time", &payload.start_time),
        ("end_time", &payload.end_time),
        ("place", &payload.place),
    ] {
        if value.trim().is_empty() {
            return Err(RemoteError::Validation {
                message: format!("missing field '{field}'"),
            });
        }
    }
    Ok(())
}

fn apply_payload(record: &mut PersistedReservation, payload: &ReservationPayload) {
    record.name = payload.name.clone();
    record.unit = payload.unit.clone();
    record.date = payload.date.clone();
    record.start_time = payload.start_time.clone();
    record.end_time = payload.end_time.clone();
    record.people = payload.people.clone();
    record.reporter = payload.reporter.clone();
    record.place = payload.place.clone();
}

#[async_trait]
impl BookingBackend for InMemoryBackend {
    async fn list(&self) -> Result<Vec<PersistedReservation>, RemoteError> {
        let inner = self.lock();
        if inner.offline {
            return Err(offline_error());
        }
        Ok(inner.records.clone())
    }

    async fn create(&self, payload: &ReservationPayload) -> Result<i64, RemoteError> {
        validate(payload)?;
        let mut inner = self.lock();
        if inner.offline {
            return Err(offline_error());
        }
        inner.next_id += 1;
        let id: i64 = inner.next_id;
        let mut record = PersistedReservation {
            id,
            name: String::new(),
            unit: String::new(),
            date: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            people: String::new(),
            reporter: String::new(),
            place: String::new(),
        };
        apply_payload(&mut record, payload);
        inner.records.push(record);
        Ok(id)
    }

    async fn update(&self, id: i64, payload: &ReservationPayload) -> Result<(), RemoteError> {
        validate(payload)?;
        let mut inner = self.lock();
        if inner.offline {
            return Err(offline_error());
        }
        match inner.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                apply_payload(record, payload);
                Ok(())
            }
            None => Err(RemoteError::NotFound {
                message: format!("no reservation with id {id}"),
            }),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), RemoteError> {
        let mut inner = self.lock();
        if inner.offline {
            return Err(offline_error());
        }
        let before: usize = inner.records.len();
        inner.records.retain(|r| r.id != id);
        if inner.records.len() == before {
            return Err(RemoteError::NotFound {
                message: format!("no reservation with id {id}"),
            });
        }
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<PersistedReservation>, RemoteError> {
        let inner = self.lock();
        if inner.offline {
            return Err(offline_error());
        }

        // ISO dates compare correctly as strings.
        let mut hits: Vec<PersistedReservation> = inner
            .records
            .iter()
            .filter(|r| r.date.as_str() >= query.from.as_str() && r.date.as_str() <= query.to.as_str())
            .filter(|r| {
                query
                    .place
                    .as_deref()
                    .is_none_or(|place| r.place.contains(place))
            })
            .filter(|r| {
                query.keyword.as_deref().is_none_or(|keyword| {
                    r.name.contains(keyword)
                        || r.unit.contains(keyword)
                        || r.reporter.contains(keyword)
                        || r.place.contains(keyword)
                })
            })
            .cloned()
            .collect();

        hits.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.start_time.cmp(&b.start_time))
        });
        Ok(hits)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload(date: &str, start: &str, end: &str, place: &str) -> ReservationPayload {
        ReservationPayload {
            name: String::from("Planning"),
            unit: String::from("Engineering"),
            date: String::from(date),
            start_time: String::from(start),
            end_time: String::from(end),
            people: String::from("team"),
            reporter: String::from("AB"),
            place: String::from(place),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let backend = InMemoryBackend::new();
        let first = backend
            .create(&payload("2024-01-10", "08:00", "09:00", "5F Conference Room"))
            .await
            .unwrap();
        let second = backend
            .create(&payload("2024-01-10", "09:00", "10:00", "5F Conference Room"))
            .await
            .unwrap();
        assert!(second > first);
        assert_eq!(backend.records().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let backend = InMemoryBackend::new();
        let mut bad = payload("2024-01-10", "08:00", "09:00", "5F Conference Room");
        bad.place = String::new();
        assert!(matches!(
            backend.create(&bad).await,
            Err(RemoteError::Validation { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let backend = InMemoryBackend::new();
        let result = backend
            .update(99, &payload("2024-01-10", "08:00", "09:00", "5F Conference Room"))
            .await;
        assert!(matches!(result, Err(RemoteError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let backend = InMemoryBackend::new();
        assert!(matches!(
            backend.delete(99).await,
            Err(RemoteError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_offline_backend_reports_transport_failure() {
        let backend = InMemoryBackend::new();
        backend.set_offline(true);
        assert!(matches!(
            backend.list().await,
            Err(RemoteError::Transport { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_filters_by_range_place_and_keyword() {
        let backend = InMemoryBackend::new();
        backend
            .create(&payload("2024-01-10", "08:00", "09:00", "5F Conference Room"))
            .await
            .unwrap();
        backend
            .create(&payload("2024-01-20", "08:00", "09:00", "2F Conference Room"))
            .await
            .unwrap();

        let query = SearchQuery {
            from: String::from("2024-01-01"),
            to: String::from("2024-01-15"),
            place: Some(String::from("5F")),
            keyword: Some(String::from("Planning")),
        };
        let hits = backend.search(&query).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].place, "5F Conference Room");
    }
}
