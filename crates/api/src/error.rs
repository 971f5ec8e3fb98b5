// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use sereno::CoreError;
use sereno_domain::DomainError;
use sereno_persistence::PersistenceError;

use crate::request_response::RequestParseError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Every variant carries a stable machine-readable code (see [`ApiError::codigo`])
/// alongside the human message.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The actor identity header is missing or malformed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The dispatcher-ownership invariant was violated.
    Forbidden {
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A unique or referential constraint was violated.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    ///
    /// Includes the unrecoverable missing-initial-status configuration
    /// error: retrying cannot fix a seed problem.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the stable machine-readable code for this error.
    #[must_use]
    pub const fn codigo(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "UNAUTHENTICATED",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::InvalidInput { .. } => "VALIDATION",
            Self::ResourceNotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Internal { .. } => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden { message } => write!(f, "Forbidden: {message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RequestParseError> for ApiError {
    fn from(err: RequestParseError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidNovedadCode(code) => ApiError::InvalidInput {
            field: String::from("novedad_code"),
            message: format!("Invalid incident code '{code}'"),
        },
        DomainError::NovedadCodeOverflow { last } => ApiError::Internal {
            message: format!("Incident code sequence exhausted after '{last}'"),
        },
        DomainError::InvalidPrioridad(value) => ApiError::InvalidInput {
            field: String::from("prioridad"),
            message: format!("Invalid priority '{value}'"),
        },
        DomainError::InvalidTurno(value) => ApiError::InvalidInput {
            field: String::from("turno"),
            message: format!("Invalid turno '{value}'"),
        },
        DomainError::NovedadNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Novedad"),
            message: format!("Incident {id} does not exist"),
        },
        DomainError::EstadoNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Estado"),
            message: format!("Status {id} does not exist"),
        },
        DomainError::NoEstadoInicial => ApiError::Internal {
            message: String::from("No initial status is configured in the status catalog"),
        },
        DomainError::SubtipoNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Subtipo"),
            message: format!("Incident subtype {id} does not exist"),
        },
        DomainError::DispatchOwnership {
            usuario_despacho,
            actor,
        } => ApiError::Forbidden {
            message: format!(
                "Incident is dispatched by user {usuario_despacho}; user {actor} may not modify it"
            ),
        },
        DomainError::FechaParseError { value, error } => ApiError::InvalidInput {
            field: String::from("fecha"),
            message: format!("Failed to parse timestamp '{value}': {error}"),
        },
        DomainError::InvalidUbicacion(msg) => ApiError::InvalidInput {
            field: String::from("ubicacion"),
            message: msg,
        },
        DomainError::InvalidCoordenadas { latitud, longitud } => ApiError::InvalidInput {
            field: String::from("coordenadas"),
            message: format!("Invalid coordinates ({latitud}, {longitud})"),
        },
        DomainError::InvalidReportante(msg) => ApiError::InvalidInput {
            field: String::from("reportante"),
            message: msg,
        },
        DomainError::InvalidReferencia { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("Invalid reference: {value}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Transition rejections unwrap back to their domain meaning; constraint
/// violations become conflicts; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::TransitionRejected(core_err) => translate_core_error(core_err),
        PersistenceError::UniqueViolation(msg) | PersistenceError::ForeignKeyViolation(msg) => {
            ApiError::Conflict {
                message: format!("Duplicate or invalid reference: {msg}"),
            }
        }
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Recurso"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
