// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use sereno_domain::{DomainError, EstadoNovedad};

// Re-export public types and functions
pub use apply::{plan_asignacion, plan_create, plan_status_transition, plan_update};
pub use command::{AsignacionRecursos, CreateNovedad, NovedadPatch};
pub use error::CoreError;
pub use state::{CreatePlan, NovedadCambios, NovedadImage, TransitionPlan};

/// Resolves a caller-supplied target status to an active catalog entry.
///
/// This is a read-only validation that does not write history.
///
/// # Arguments
///
/// * `estado` - The catalog entry the lookup produced, if any
/// * `estado_novedad_id` - The id the caller asked for
///
/// # Returns
///
/// * `Ok(EstadoNovedad)` if the entry exists and is active
/// * `Err(DomainError::EstadoNotFound)` otherwise
///
/// # Errors
///
/// Returns an error if the status does not exist or is inactive.
pub fn resolve_estado_objetivo(
    estado: Option<EstadoNovedad>,
    estado_novedad_id: i64,
) -> Result<EstadoNovedad, DomainError> {
    match estado {
        Some(e) if e.activo => Ok(e),
        _ => Err(DomainError::EstadoNotFound(estado_novedad_id)),
    }
}

/// Resolves the status catalog's unique initial entry.
///
/// The absence of an initial status is a deployment/seed error the system
/// cannot recover from; creation must fail fatally.
///
/// # Arguments
///
/// * `estado` - The catalog entry the initial-status lookup produced
///
/// # Errors
///
/// Returns `DomainError::NoEstadoInicial` if no initial status exists.
pub fn resolve_estado_inicial(
    estado: Option<EstadoNovedad>,
) -> Result<EstadoNovedad, DomainError> {
    match estado {
        Some(e) if e.activo && e.es_inicial => Ok(e),
        _ => Err(DomainError::NoEstadoInicial),
    }
}
