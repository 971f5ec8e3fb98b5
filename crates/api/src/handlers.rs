// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for incident operations.
//!
//! Handlers translate wire payloads into core commands, invoke the
//! persistence adapter (which owns the transaction), and translate
//! failures into the API error taxonomy. Permission checks happened
//! upstream; the actor received here is already authenticated.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::info;

use sereno::{AsignacionRecursos, CreateNovedad, NovedadPatch};
use sereno_historial::Actor;
use sereno_persistence::{CambioEstadoData, NovedadDetalle, Persistence};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{
    ActualizarNovedadRequest, AsignarRecursosRequest, CrearNovedadRequest,
    EliminarNovedadResponse, EstadoNovedadInfo,
};

/// Creates an incident.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `request` - The wire payload
/// * `actor` - The authenticated user
/// * `now` - The request instant
/// * `zona` - The configured display timezone
///
/// # Errors
///
/// Returns an error if the payload is malformed, the subtype is unknown,
/// no initial status is configured, or persistence fails.
pub fn crear_novedad(
    persistence: &mut Persistence,
    request: &CrearNovedadRequest,
    actor: Actor,
    now: DateTime<Utc>,
    zona: Tz,
) -> Result<NovedadDetalle, ApiError> {
    let command: CreateNovedad = request.to_command()?;

    info!(
        usuario = actor.usuario_id,
        tipo = command.tipo_novedad_id,
        subtipo = command.subtipo_novedad_id,
        "Handling crear_novedad request"
    );

    let detalle: NovedadDetalle = persistence
        .create_novedad(&command, actor, now, zona)
        .map_err(translate_persistence_error)?;

    info!(
        novedad_id = detalle.novedad.novedad_id,
        code = %detalle.novedad.novedad_code,
        "Incident created"
    );
    Ok(detalle)
}

/// Applies a generic update to an incident.
///
/// # Errors
///
/// Returns an error if the payload is malformed, the incident is
/// missing, the caller is not the dispatcher of a dispatched incident,
/// or persistence fails.
pub fn actualizar_novedad(
    persistence: &mut Persistence,
    novedad_id: i64,
    request: &ActualizarNovedadRequest,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<NovedadDetalle, ApiError> {
    let patch: NovedadPatch = request.to_command()?;

    info!(
        novedad_id,
        usuario = actor.usuario_id,
        "Handling actualizar_novedad request"
    );

    persistence
        .update_novedad(novedad_id, &patch, actor, now)
        .map_err(translate_persistence_error)
}

/// Assigns resources to an incident (dispatch).
///
/// # Errors
///
/// Returns an error if the payload is malformed, the incident is
/// missing, the caller is not the dispatcher of a dispatched incident,
/// or persistence fails.
pub fn asignar_recursos(
    persistence: &mut Persistence,
    novedad_id: i64,
    request: &AsignarRecursosRequest,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<NovedadDetalle, ApiError> {
    let asignacion: AsignacionRecursos = request.to_command()?;

    info!(
        novedad_id,
        usuario = actor.usuario_id,
        "Handling asignar_recursos request"
    );

    persistence
        .asignar_recursos(novedad_id, &asignacion, actor, now)
        .map_err(translate_persistence_error)
}

/// Soft-deletes an incident.
///
/// # Errors
///
/// Returns an error if the incident does not exist or is already
/// deleted.
pub fn eliminar_novedad(
    persistence: &mut Persistence,
    novedad_id: i64,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<EliminarNovedadResponse, ApiError> {
    info!(
        novedad_id,
        usuario = actor.usuario_id,
        "Handling eliminar_novedad request"
    );

    persistence
        .soft_delete_novedad(novedad_id, actor, now)
        .map_err(translate_persistence_error)?;

    Ok(EliminarNovedadResponse { novedad_id })
}

/// Retrieves an active incident.
///
/// # Errors
///
/// Returns not-found for missing or soft-deleted incidents.
pub fn obtener_novedad(
    persistence: &mut Persistence,
    novedad_id: i64,
) -> Result<NovedadDetalle, ApiError> {
    persistence
        .get_novedad(novedad_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Novedad"),
            message: format!("Incident {novedad_id} does not exist"),
        })
}

/// Lists active incidents, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn listar_novedades(
    persistence: &mut Persistence,
) -> Result<Vec<NovedadDetalle>, ApiError> {
    persistence
        .list_novedades()
        .map_err(translate_persistence_error)
}

/// Retrieves the history for an incident, newest first.
///
/// Soft-deleted incidents keep their history readable; an id that never
/// existed is still not-found.
///
/// # Errors
///
/// Returns an error if the incident never existed or the query fails.
pub fn obtener_historial(
    persistence: &mut Persistence,
    novedad_id: i64,
) -> Result<Vec<CambioEstadoData>, ApiError> {
    let existe: bool = persistence
        .novedad_exists(novedad_id)
        .map_err(translate_persistence_error)?;
    if !existe {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Novedad"),
            message: format!("Incident {novedad_id} does not exist"),
        });
    }

    persistence
        .get_historial(novedad_id)
        .map_err(translate_persistence_error)
}

/// Lists the active status catalog ordered by rank.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn listar_estados(
    persistence: &mut Persistence,
) -> Result<Vec<EstadoNovedadInfo>, ApiError> {
    Ok(persistence
        .list_estados()
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(EstadoNovedadInfo::from)
        .collect())
}
