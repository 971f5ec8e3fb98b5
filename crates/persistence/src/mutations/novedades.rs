// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident mutation orchestrations.
//!
//! Each function here is one atomic transaction: pessimistic lock, row
//! image read, core planning, row write, and the history insert commit
//! together or roll back together. A rejection from the transition engine
//! surfaces as `PersistenceError::TransitionRejected` from inside the
//! closure, which aborts the transaction.
//!
//! Function bodies are self-contained (inline DSL plus `PersistenceBackend`
//! trait helpers) so the `backend_fn!` macro can generate both backend
//! versions from one body.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use sereno::{
    AsignacionRecursos, CoreError, CreateNovedad, CreatePlan, NovedadCambios, NovedadImage,
    NovedadPatch, TransitionPlan, plan_asignacion, plan_create, plan_update,
    resolve_estado_inicial, resolve_estado_objetivo,
};
use sereno_domain::{
    DomainError, EstadoNovedad, NOMBRES_ESTADO_DESPACHO, Prioridad, format_fecha, parse_fecha,
};
use sereno_historial::{Actor, CambioEstado};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{estados_novedad, novedades, novedades_historial, subtipos_novedad};
use crate::error::PersistenceError;
use crate::queries::estados::{EstadoRow, to_estado};

/// Diesel changeset for the update paths.
///
/// `None` fields are skipped by Diesel, which is exactly the patch
/// semantics the planning layer produces. `updated_at`/`updated_by` are
/// unconditional, so the changeset is never empty.
#[derive(AsChangeset)]
#[diesel(table_name = novedades)]
struct NovedadChangeset {
    estado_novedad_id: Option<i64>,
    prioridad_actual: Option<String>,
    descripcion: Option<String>,
    ubicacion: Option<String>,
    direccion_id: Option<i64>,
    cuadrante_id: Option<i64>,
    latitud: Option<f64>,
    longitud: Option<f64>,
    unidad_oficina_id: Option<i64>,
    vehiculo_id: Option<i64>,
    personal_1_id: Option<i64>,
    personal_2_id: Option<i64>,
    personal_3_id: Option<i64>,
    personal_4_id: Option<i64>,
    km_inicial: Option<f64>,
    km_final: Option<f64>,
    turno: Option<String>,
    observaciones: Option<String>,
    usuario_despacho: Option<i64>,
    fecha_despacho: Option<String>,
    fecha_llegada: Option<String>,
    fecha_cierre: Option<String>,
    requiere_seguimiento: Option<i32>,
    fecha_seguimiento: Option<String>,
    perdidas_materiales: Option<f64>,
    tiempo_respuesta_min: Option<i64>,
    updated_at: String,
    updated_by: i64,
}

/// Maps a planned change set onto the Diesel changeset.
fn changeset_from(cambios: NovedadCambios, actor: Actor, now: DateTime<Utc>) -> NovedadChangeset {
    NovedadChangeset {
        estado_novedad_id: cambios.estado_novedad_id,
        prioridad_actual: cambios.prioridad_actual.map(|p| p.as_str().to_string()),
        descripcion: cambios.descripcion,
        ubicacion: cambios.ubicacion,
        direccion_id: cambios.direccion_id,
        cuadrante_id: cambios.cuadrante_id,
        latitud: cambios.latitud,
        longitud: cambios.longitud,
        unidad_oficina_id: cambios.unidad_oficina_id,
        vehiculo_id: cambios.vehiculo_id,
        personal_1_id: cambios.personal_1_id,
        personal_2_id: cambios.personal_2_id,
        personal_3_id: cambios.personal_3_id,
        personal_4_id: cambios.personal_4_id,
        km_inicial: cambios.km_inicial,
        km_final: cambios.km_final,
        turno: cambios.turno.map(|t| t.as_str().to_string()),
        observaciones: cambios.observaciones,
        usuario_despacho: cambios.usuario_despacho,
        fecha_despacho: cambios.fecha_despacho.map(format_fecha),
        fecha_llegada: cambios.fecha_llegada.map(format_fecha),
        fecha_cierre: cambios.fecha_cierre.map(format_fecha),
        requiere_seguimiento: cambios.requiere_seguimiento.map(i32::from),
        fecha_seguimiento: cambios.fecha_seguimiento.map(format_fecha),
        perdidas_materiales: cambios.perdidas_materiales,
        tiempo_respuesta_min: cambios.tiempo_respuesta_min,
        updated_at: format_fecha(now),
        updated_by: actor.usuario_id,
    }
}

/// Row tuple loaded as the pre-update image.
type ImageTuple = (
    i64,
    i64,
    Option<i64>,
    String,
    Option<String>,
    Option<i64>,
    String,
);

/// Builds the core row image from the locked read.
///
/// Stored timestamps are RFC 3339 produced by this layer; a parse failure
/// means corrupt data, not caller error.
fn image_from(tuple: ImageTuple) -> Result<NovedadImage, PersistenceError> {
    let (
        novedad_id,
        estado_novedad_id,
        usuario_despacho,
        fecha_ocurrencia,
        fecha_llegada,
        tiempo_respuesta_min,
        updated_at,
    ) = tuple;

    let parse = |value: &str| {
        parse_fecha(value)
            .map_err(|e| PersistenceError::SerializationError(format!("stored timestamp: {e}")))
    };

    Ok(NovedadImage {
        novedad_id,
        estado_novedad_id,
        usuario_despacho,
        fecha_ocurrencia: parse(&fecha_ocurrencia)?,
        fecha_llegada: fecha_llegada.as_deref().map(parse).transpose()?,
        tiempo_respuesta_min,
        updated_at: parse(&updated_at)?,
    })
}

/// Serializes a history entry's metadata blob.
fn metadata_json_of(entry: &CambioEstado) -> Result<Option<String>, PersistenceError> {
    entry
        .metadata
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(PersistenceError::from)
}

backend_fn! {

/// Creates an incident.
///
/// One transaction: locked highest-code read, subtype and initial-status
/// resolution, row insert, and the explicit creation history entry. The
/// transition engine never fires on inserts, so the entry is written here.
///
/// # Returns
///
/// The id of the created incident.
///
/// # Errors
///
/// Returns an error if the subtype is missing, no initial status is
/// configured, or any insert fails; the transaction rolls back in full.
#[allow(clippy::too_many_lines)]
pub fn create_novedad(
    conn: &mut _,
    input: &CreateNovedad,
    actor: Actor,
    now: DateTime<Utc>,
    zona: Tz,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        // Resolve the subtype and its default priority.
        let subtipo: Option<Option<String>> = subtipos_novedad::table
            .filter(subtipos_novedad::subtipo_novedad_id.eq(input.subtipo_novedad_id))
            .filter(subtipos_novedad::activo.eq(1))
            .select(subtipos_novedad::prioridad_default)
            .first(conn)
            .optional()?;
        let Some(prioridad_default) = subtipo else {
            return Err(CoreError::DomainViolation(DomainError::SubtipoNotFound(
                input.subtipo_novedad_id,
            ))
            .into());
        };
        let prioridad_subtipo: Option<Prioridad> = prioridad_default
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e: DomainError| {
                PersistenceError::SerializationError(format!("stored priority: {e}"))
            })?;

        // Resolve the unique initial status; its absence is fatal.
        let inicial_row: Option<EstadoRow> = estados_novedad::table
            .filter(estados_novedad::es_inicial.eq(1))
            .filter(estados_novedad::activo.eq(1))
            .order(estados_novedad::estado_novedad_id.asc())
            .select(EstadoRow::as_select())
            .first(conn)
            .optional()?;
        let estado_inicial: EstadoNovedad =
            resolve_estado_inicial(inicial_row.map(to_estado)).map_err(CoreError::from)?;

        // Locked read serializes concurrent code generation.
        let last_code: Option<String> = conn.last_novedad_code_locked()?;

        let plan: CreatePlan = plan_create(
            input,
            prioridad_subtipo,
            &estado_inicial,
            last_code.as_deref(),
            actor,
            now,
            zona,
        )
        .map_err(PersistenceError::from)?;

        let now_str: String = format_fecha(now);

        diesel::insert_into(novedades::table)
            .values((
                novedades::novedad_code.eq(plan.code.value()),
                novedades::tipo_novedad_id.eq(input.tipo_novedad_id),
                novedades::subtipo_novedad_id.eq(input.subtipo_novedad_id),
                novedades::prioridad_actual.eq(plan.prioridad.as_str()),
                novedades::turno.eq(plan.turno.as_str()),
                novedades::descripcion.eq(input.descripcion.as_deref()),
                novedades::ubicacion.eq(input.ubicacion.as_deref()),
                novedades::direccion_id.eq(input.direccion_id),
                novedades::cuadrante_id.eq(input.cuadrante_id),
                novedades::latitud.eq(input.latitud),
                novedades::longitud.eq(input.longitud),
                novedades::reportante_nombre.eq(input.reportante_nombre.as_deref()),
                novedades::reportante_telefono.eq(input.reportante_telefono.as_deref()),
                novedades::es_anonimo.eq(i32::from(input.es_anonimo)),
                novedades::estado_novedad_id.eq(plan.estado_novedad_id),
                novedades::fecha_ocurrencia.eq(format_fecha(plan.fecha_ocurrencia)),
                novedades::fecha_reporte.eq(format_fecha(plan.fecha_reporte)),
                novedades::activo.eq(1),
                novedades::created_at.eq(&now_str),
                novedades::updated_at.eq(&now_str),
                novedades::created_by.eq(actor.usuario_id),
            ))
            .execute(conn)?;

        let novedad_id: i64 = conn.get_last_insert_rowid()?;

        let metadata_json: Option<String> = metadata_json_of(&plan.historial)?;
        diesel::insert_into(novedades_historial::table)
            .values((
                novedades_historial::novedad_id.eq(novedad_id),
                novedades_historial::estado_anterior_id.eq(plan.historial.estado_anterior_id),
                novedades_historial::estado_nuevo_id.eq(plan.historial.estado_nuevo_id),
                novedades_historial::usuario_id.eq(plan.historial.usuario_id),
                novedades_historial::tiempo_transcurrido_min
                    .eq(plan.historial.tiempo_transcurrido_min),
                novedades_historial::observaciones.eq(plan.historial.observaciones.as_deref()),
                novedades_historial::metadata_json.eq(metadata_json),
                novedades_historial::fecha_cambio.eq(format_fecha(plan.historial.fecha_cambio)),
                novedades_historial::created_by.eq(plan.historial.created_by),
            ))
            .execute(conn)?;

        info!(
            novedad_id,
            code = plan.code.value(),
            turno = plan.turno.as_str(),
            "Created incident"
        );

        Ok(novedad_id)
    })
}

}

backend_fn! {

/// Applies a generic update to an incident.
///
/// One transaction: row lock, image read, core planning, row write, and
/// (when the status changed) the history entry the transition engine
/// produced.
///
/// # Errors
///
/// Returns an error if the incident is missing/soft-deleted, the caller
/// is not the dispatcher of a dispatched incident, or a supplied target
/// status does not exist.
pub fn update_novedad(
    conn: &mut _,
    novedad_id: i64,
    patch: &NovedadPatch,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        conn.lock_novedad_row(novedad_id)?;

        let row: Option<ImageTuple> = novedades::table
            .filter(novedades::novedad_id.eq(novedad_id))
            .filter(novedades::activo.eq(1))
            .select((
                novedades::novedad_id,
                novedades::estado_novedad_id,
                novedades::usuario_despacho,
                novedades::fecha_ocurrencia,
                novedades::fecha_llegada,
                novedades::tiempo_respuesta_min,
                novedades::updated_at,
            ))
            .first(conn)
            .optional()?;
        let Some(row) = row else {
            return Err(
                CoreError::DomainViolation(DomainError::NovedadNotFound(novedad_id)).into(),
            );
        };
        let image: NovedadImage = image_from(row)?;

        // A caller-supplied target status must exist and be active.
        if let Some(target) = patch.estado_novedad_id {
            let estado: Option<EstadoRow> = estados_novedad::table
                .filter(estados_novedad::estado_novedad_id.eq(target))
                .select(EstadoRow::as_select())
                .first(conn)
                .optional()?;
            resolve_estado_objetivo(estado.map(to_estado), target).map_err(CoreError::from)?;
        }

        let plan: TransitionPlan =
            plan_update(&image, patch, actor, now).map_err(PersistenceError::from)?;

        diesel::update(novedades::table.filter(novedades::novedad_id.eq(novedad_id)))
            .set(changeset_from(plan.cambios, actor, now))
            .execute(conn)?;

        if let Some(entry) = plan.historial {
            let metadata_json: Option<String> = metadata_json_of(&entry)?;
            diesel::insert_into(novedades_historial::table)
                .values((
                    novedades_historial::novedad_id.eq(novedad_id),
                    novedades_historial::estado_anterior_id.eq(entry.estado_anterior_id),
                    novedades_historial::estado_nuevo_id.eq(entry.estado_nuevo_id),
                    novedades_historial::usuario_id.eq(entry.usuario_id),
                    novedades_historial::tiempo_transcurrido_min
                        .eq(entry.tiempo_transcurrido_min),
                    novedades_historial::observaciones.eq(entry.observaciones.as_deref()),
                    novedades_historial::metadata_json.eq(metadata_json),
                    novedades_historial::fecha_cambio.eq(format_fecha(entry.fecha_cambio)),
                    novedades_historial::created_by.eq(entry.created_by),
                ))
                .execute(conn)?;
            debug!(
                novedad_id,
                estado_anterior = ?entry.estado_anterior_id,
                estado_nuevo = entry.estado_nuevo_id,
                "Recorded status transition"
            );
        }

        info!(novedad_id, "Updated incident");
        Ok(())
    })
}

}

backend_fn! {

/// Assigns resources to an incident (dispatch).
///
/// One transaction: row lock, image read, dispatched-status resolution,
/// core planning, row write, and the single history entry (with caller
/// overrides merged) when the status changed.
///
/// # Errors
///
/// Returns an error if the incident is missing/soft-deleted, the caller
/// is not the dispatcher of a dispatched incident, or an explicit target
/// status does not exist.
#[allow(clippy::too_many_lines)]
pub fn asignar_recursos(
    conn: &mut _,
    novedad_id: i64,
    asignacion: &AsignacionRecursos,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        conn.lock_novedad_row(novedad_id)?;

        let row: Option<ImageTuple> = novedades::table
            .filter(novedades::novedad_id.eq(novedad_id))
            .filter(novedades::activo.eq(1))
            .select((
                novedades::novedad_id,
                novedades::estado_novedad_id,
                novedades::usuario_despacho,
                novedades::fecha_ocurrencia,
                novedades::fecha_llegada,
                novedades::tiempo_respuesta_min,
                novedades::updated_at,
            ))
            .first(conn)
            .optional()?;
        let Some(row) = row else {
            return Err(
                CoreError::DomainViolation(DomainError::NovedadNotFound(novedad_id)).into(),
            );
        };
        let image: NovedadImage = image_from(row)?;

        // Explicit target status wins; otherwise resolve a dispatched
        // status by display name; otherwise leave the status unchanged.
        let explicito: Option<i64> = asignacion.estado_novedad_id.filter(|v| *v != 0);
        let estado_resuelto: Option<i64> = if let Some(target) = explicito {
            let estado: Option<EstadoRow> = estados_novedad::table
                .filter(estados_novedad::estado_novedad_id.eq(target))
                .select(EstadoRow::as_select())
                .first(conn)
                .optional()?;
            let resuelto: EstadoNovedad = resolve_estado_objetivo(estado.map(to_estado), target)
                .map_err(CoreError::from)?;
            Some(resuelto.estado_novedad_id)
        } else {
            let candidatos: Vec<EstadoRow> = estados_novedad::table
                .filter(estados_novedad::nombre.eq_any(NOMBRES_ESTADO_DESPACHO))
                .filter(estados_novedad::activo.eq(1))
                .select(EstadoRow::as_select())
                .load(conn)?;
            let estados: Vec<EstadoNovedad> = candidatos.into_iter().map(to_estado).collect();
            NOMBRES_ESTADO_DESPACHO
                .iter()
                .find_map(|nombre| estados.iter().find(|e| e.nombre == *nombre))
                .map(|e| e.estado_novedad_id)
        };

        let plan: TransitionPlan =
            plan_asignacion(&image, asignacion, estado_resuelto, actor, now)
                .map_err(PersistenceError::from)?;

        diesel::update(novedades::table.filter(novedades::novedad_id.eq(novedad_id)))
            .set(changeset_from(plan.cambios, actor, now))
            .execute(conn)?;

        if let Some(entry) = plan.historial {
            let metadata_json: Option<String> = metadata_json_of(&entry)?;
            diesel::insert_into(novedades_historial::table)
                .values((
                    novedades_historial::novedad_id.eq(novedad_id),
                    novedades_historial::estado_anterior_id.eq(entry.estado_anterior_id),
                    novedades_historial::estado_nuevo_id.eq(entry.estado_nuevo_id),
                    novedades_historial::usuario_id.eq(entry.usuario_id),
                    novedades_historial::tiempo_transcurrido_min
                        .eq(entry.tiempo_transcurrido_min),
                    novedades_historial::observaciones.eq(entry.observaciones.as_deref()),
                    novedades_historial::metadata_json.eq(metadata_json),
                    novedades_historial::fecha_cambio.eq(format_fecha(entry.fecha_cambio)),
                    novedades_historial::created_by.eq(entry.created_by),
                ))
                .execute(conn)?;
            debug!(
                novedad_id,
                estado_anterior = ?entry.estado_anterior_id,
                estado_nuevo = entry.estado_nuevo_id,
                "Recorded dispatch transition"
            );
        }

        info!(
            novedad_id,
            despachador = actor.usuario_id,
            estado_resuelto = ?estado_resuelto,
            "Assigned resources"
        );
        Ok(())
    })
}

}

backend_fn! {

/// Soft-deletes an incident.
///
/// Acting on an already-deleted id is not-found, not a no-op success.
/// History rows are untouched and remain queryable.
///
/// # Errors
///
/// Returns an error if the incident does not exist or is already deleted.
pub fn soft_delete_novedad(
    conn: &mut _,
    novedad_id: i64,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        conn.lock_novedad_row(novedad_id)?;

        let existente: Option<i64> = novedades::table
            .filter(novedades::novedad_id.eq(novedad_id))
            .filter(novedades::activo.eq(1))
            .select(novedades::novedad_id)
            .first(conn)
            .optional()?;
        if existente.is_none() {
            return Err(
                CoreError::DomainViolation(DomainError::NovedadNotFound(novedad_id)).into(),
            );
        }

        let now_str: String = format_fecha(now);
        diesel::update(novedades::table.filter(novedades::novedad_id.eq(novedad_id)))
            .set((
                novedades::activo.eq(0),
                novedades::deleted_at.eq(&now_str),
                novedades::deleted_by.eq(actor.usuario_id),
                novedades::updated_at.eq(&now_str),
                novedades::updated_by.eq(actor.usuario_id),
            ))
            .execute(conn)?;

        info!(novedad_id, eliminado_por = actor.usuario_id, "Soft-deleted incident");
        Ok(())
    })
}

}
