// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timestamp parsing, formatting and derived time computations.
//!
//! Timestamps are stored as RFC 3339 UTC strings. The configured display
//! timezone is used only to compute the turno classification and at
//! presentation boundaries, never for storage.

use crate::error::DomainError;
use crate::tipos::Turno;
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use chrono_tz::Tz;

/// Parses an RFC 3339 timestamp into a UTC instant.
///
/// Offsets other than `Z` are accepted and normalized to UTC.
///
/// # Errors
///
/// Returns `DomainError::FechaParseError` if the string is not a valid
/// RFC 3339 timestamp.
pub fn parse_fecha(value: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::FechaParseError {
            value: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a UTC instant as an RFC 3339 string for storage.
#[must_use]
pub fn format_fecha(fecha: DateTime<Utc>) -> String {
    fecha.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Classifies an occurrence instant into a turno.
///
/// The instant is converted to the display timezone first; the turno is a
/// property of the local hour at which the incident occurred, not of the
/// UTC hour.
#[must_use]
pub fn turno_para(ocurrencia: DateTime<Utc>, zona: Tz) -> Turno {
    let hora_local: u32 = ocurrencia.with_timezone(&zona).hour();
    Turno::from_hora(hora_local)
}

/// Whole minutes elapsed between two instants, truncated toward zero.
///
/// Used for the response-time derivation and for time-in-previous-status
/// on history entries. A `hasta` earlier than `desde` yields zero rather
/// than a negative duration.
#[must_use]
pub fn minutos_entre(desde: DateTime<Utc>, hasta: DateTime<Utc>) -> i64 {
    (hasta - desde).num_minutes().max(0)
}
