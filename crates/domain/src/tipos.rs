// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core value types: priority, turno and the sequential incident code.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of digits in a zero-padded incident code.
const NOVEDAD_CODE_DIGITS: usize = 6;

/// Incident priority.
///
/// A freshly created incident takes its subtype's default priority,
/// falling back to `Media` when the subtype defines none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Prioridad {
    /// High priority.
    Alta,
    /// Medium priority (the default).
    #[default]
    Media,
    /// Low priority.
    Baja,
}

impl Prioridad {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Alta => "ALTA",
            Self::Media => "MEDIA",
            Self::Baja => "BAJA",
        }
    }

    /// Parses a priority from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrioridad` if the string is not a valid priority.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "ALTA" => Ok(Self::Alta),
            "MEDIA" => Ok(Self::Media),
            "BAJA" => Ok(Self::Baja),
            _ => Err(DomainError::InvalidPrioridad(s.to_string())),
        }
    }
}

impl FromStr for Prioridad {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Prioridad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse shift-of-day classification derived from the occurrence hour.
///
/// Computed once at creation from the occurrence instant expressed in the
/// configured display timezone. Hour boundaries: [6,14) is morning,
/// [14,22) is afternoon, everything else is night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Turno {
    /// Morning shift, occurrence hour in [6, 14).
    Manana,
    /// Afternoon shift, occurrence hour in [14, 22).
    Tarde,
    /// Night shift, occurrence hour in [22, 24) or [0, 6).
    Noche,
}

impl Turno {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manana => "MAÑANA",
            Self::Tarde => "TARDE",
            Self::Noche => "NOCHE",
        }
    }

    /// Classifies an hour-of-day (0-23) into a turno.
    #[must_use]
    pub const fn from_hora(hora: u32) -> Self {
        if hora >= 6 && hora < 14 {
            Self::Manana
        } else if hora >= 14 && hora < 22 {
            Self::Tarde
        } else {
            Self::Noche
        }
    }

    /// Parses a turno from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTurno` if the string is not a valid turno.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "MAÑANA" => Ok(Self::Manana),
            "TARDE" => Ok(Self::Tarde),
            "NOCHE" => Ok(Self::Noche),
            _ => Err(DomainError::InvalidTurno(s.to_string())),
        }
    }
}

impl FromStr for Turno {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Turno {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A zero-padded 6-digit sequential incident code.
///
/// Codes are unique and monotonically increasing; the successor of the
/// highest persisted code is assigned under a pessimistic lock so that
/// concurrent creations can never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NovedadCode(String);

impl NovedadCode {
    /// The first code in an empty database.
    #[must_use]
    pub fn first() -> Self {
        Self(String::from("000001"))
    }

    /// Parses and validates an existing code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNovedadCode` if the string is not a
    /// 6-digit numeric code.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        if code.len() != NOVEDAD_CODE_DIGITS || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidNovedadCode(code.to_string()));
        }
        Ok(Self(code.to_string()))
    }

    /// Computes the successor of the highest existing code.
    ///
    /// `None` means the incidents table is empty and the sequence starts
    /// at `000001`.
    ///
    /// # Errors
    ///
    /// Returns an error if `last` is not a valid code or the sequence
    /// cannot be advanced without exceeding 6 digits.
    pub fn next_after(last: Option<&str>) -> Result<Self, DomainError> {
        let Some(last) = last else {
            return Ok(Self::first());
        };

        let parsed: Self = Self::parse(last)?;
        let value: u64 = parsed
            .0
            .parse::<u64>()
            .map_err(|_| DomainError::InvalidNovedadCode(last.to_string()))?;

        let next: u64 = value + 1;
        if next >= 1_000_000 {
            return Err(DomainError::NovedadCodeOverflow {
                last: last.to_string(),
            });
        }

        Ok(Self(format!("{next:06}")))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NovedadCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
