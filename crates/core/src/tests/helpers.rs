// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{ReservationStore, StoreConfig};
use chrono::{NaiveDate, NaiveDateTime};
use roombook_domain::{Attachment, ReservationRequest};
use roombook_remote::{InMemoryBackend, PersistedReservation};

pub fn at(date: &str, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn request(date: &str, start: &str, end: &str, place: &str) -> ReservationRequest {
    ReservationRequest {
        id: None,
        name: String::from("Planning"),
        unit: String::from("Engineering"),
        date: String::from(date),
        start: String::from(start),
        end: String::from(end),
        people: String::from("team"),
        reporter: String::from("AB"),
        place: String::from(place),
        attachments: Vec::new(),
    }
}

pub fn record(id: i64, date: &str, start: &str, end: &str, place: &str) -> PersistedReservation {
    PersistedReservation {
        id,
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

pub fn attachment(file_name: &str) -> Attachment {
    Attachment {
        file_name: String::from(file_name),
        media_type: String::from("application/pdf"),
        size: 4,
        content: vec![1, 2, 3, 4],
    }
}

pub fn store() -> ReservationStore<InMemoryBackend> {
    ReservationStore::new(InMemoryBackend::new(), StoreConfig::default())
}

pub fn store_with_records(records: Vec<PersistedReservation>) -> ReservationStore<InMemoryBackend> {
    ReservationStore::new(InMemoryBackend::with_records(records), StoreConfig::default())
}
