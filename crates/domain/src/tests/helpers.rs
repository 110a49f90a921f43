// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Reservation, ReservationRequest};
use chrono::{NaiveDate, NaiveDateTime};

pub fn rooms() -> Vec<String> {
    vec![
        String::from("2F Conference Room"),
        String::from("5F Conference Room"),
    ]
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

pub fn reservation(id: i64, date: &str, start: &str, end: &str, place: &str) -> Reservation {
    Reservation::from_persisted(id, "Planning", "Engineering", date, start, end, "team", "AB", place)
        .unwrap()
}

pub fn at(date: &str, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}
