// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while parsing reservation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date string did not match the strict `YYYY-MM-DD` pattern.
    MalformedDate {
        /// The text that failed to parse.
        text: String,
    },
    /// A clock string did not match the strict `HH:MM` pattern,
    /// or its hour/minute values were out of range.
    MalformedClock {
        /// The text that failed to parse.
        text: String,
    },
    /// The end of a reservation window is not after its start.
    EmptyWindow {
        /// The start clock text.
        start: String,
        /// The end clock text.
        end: String,
    },
    /// A required field was empty.
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedDate { text } => {
                write!(f, "Malformed date '{text}': expected YYYY-MM-DD")
            }
            Self::MalformedClock { text } => {
                write!(f, "Malformed time '{text}': expected HH:MM")
            }
            Self::EmptyWindow { start, end } => {
                write!(f, "End time {end} must be after start time {start}")
            }
            Self::MissingField { field } => {
                write!(f, "Required field '{field}' is empty")
            }
        }
    }
}

impl std::error::Error for DomainError {}
