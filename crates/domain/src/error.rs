// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// An incident code is not a zero-padded numeric string.
    InvalidNovedadCode(String),
    /// The incident code sequence cannot be advanced any further.
    NovedadCodeOverflow {
        /// The last code in the sequence.
        last: String,
    },
    /// Priority string is not a recognized value.
    InvalidPrioridad(String),
    /// Turno string is not a recognized value.
    InvalidTurno(String),
    /// The requested incident does not exist or is inactive.
    NovedadNotFound(i64),
    /// The requested status catalog entry does not exist or is inactive.
    EstadoNotFound(i64),
    /// No status catalog entry is marked as initial.
    ///
    /// This is a deployment/seed error, not a caller error.
    NoEstadoInicial,
    /// The requested incident subtype does not exist.
    SubtipoNotFound(i64),
    /// A dispatched incident may only be modified by its original dispatcher.
    DispatchOwnership {
        /// The user that owns the dispatch.
        usuario_despacho: i64,
        /// The user attempting the modification.
        actor: i64,
    },
    /// Failed to parse a timestamp from a string.
    FechaParseError {
        /// The invalid timestamp string.
        value: String,
        /// The parsing error message.
        error: String,
    },
    /// Free-text location is empty or too long.
    InvalidUbicacion(String),
    /// Coordinates are outside the valid range.
    InvalidCoordenadas {
        /// The latitude value.
        latitud: f64,
        /// The longitude value.
        longitud: f64,
    },
    /// Reporter contact fields are inconsistent.
    InvalidReportante(String),
    /// A referenced identifier is not a positive value.
    InvalidReferencia {
        /// The field holding the reference.
        field: &'static str,
        /// The offending value.
        value: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNovedadCode(code) => {
                write!(f, "Invalid incident code '{code}': expected 6 digits")
            }
            Self::NovedadCodeOverflow { last } => {
                write!(f, "Incident code sequence exhausted after '{last}'")
            }
            Self::InvalidPrioridad(value) => {
                write!(f, "Invalid priority '{value}': must be ALTA, MEDIA or BAJA")
            }
            Self::InvalidTurno(value) => {
                write!(
                    f,
                    "Invalid turno '{value}': must be MAÑANA, TARDE or NOCHE"
                )
            }
            Self::NovedadNotFound(id) => write!(f, "Incident {id} not found"),
            Self::EstadoNotFound(id) => write!(f, "Status {id} not found"),
            Self::NoEstadoInicial => {
                write!(f, "No initial status is configured in the status catalog")
            }
            Self::SubtipoNotFound(id) => write!(f, "Incident subtype {id} not found"),
            Self::DispatchOwnership {
                usuario_despacho,
                actor,
            } => {
                write!(
                    f,
                    "Incident is dispatched by user {usuario_despacho}; user {actor} may not modify it"
                )
            }
            Self::FechaParseError { value, error } => {
                write!(f, "Failed to parse timestamp '{value}': {error}")
            }
            Self::InvalidUbicacion(msg) => write!(f, "Invalid location: {msg}"),
            Self::InvalidCoordenadas { latitud, longitud } => {
                write!(f, "Invalid coordinates ({latitud}, {longitud})")
            }
            Self::InvalidReportante(msg) => write!(f, "Invalid reporter data: {msg}"),
            Self::InvalidReferencia { field, value } => {
                write!(f, "Invalid reference for '{field}': {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
