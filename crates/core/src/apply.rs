// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Planning functions: the transition engine.
//!
//! Every write path that can change an incident's status funnels through
//! [`plan_status_transition`], which replaces the source system's
//! AFTER UPDATE database trigger. It is the single place that decides
//! "status changed, so record it", which is what keeps history free of
//! duplicate entries when the assignment endpoint supplies its own
//! `historial` payload.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sereno_domain::{
    DomainError, EstadoNovedad, NovedadCode, Prioridad, minutos_entre, turno_para,
    validate_coordenadas, validate_reportante, validate_ubicacion,
};
use sereno_historial::{Actor, CambioEstado, HistorialOverride};

use crate::command::{AsignacionRecursos, CreateNovedad, NovedadPatch};
use crate::error::CoreError;
use crate::state::{CreatePlan, NovedadCambios, NovedadImage, TransitionPlan};

/// Notes attached to the creation history entry.
const OBSERVACION_CREACION: &str = "Novedad registrada";

/// Default notes for a dispatch-driven status change without overrides.
const OBSERVACION_DESPACHO: &str = "Novedad despachada";

/// Falsy-skip filter for numeric references: `0` means "not provided".
const fn presente_id(value: Option<i64>) -> Option<i64> {
    match value {
        Some(v) if v != 0 => Some(v),
        _ => None,
    }
}

/// Falsy-skip filter for measurements: `0.0` means "not provided".
fn presente_medida(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Falsy-skip filter for text: the empty string means "not provided".
fn presente_texto(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Falsy-skip filter for flags: `false` means "not provided".
const fn presente_flag(value: Option<bool>) -> Option<bool> {
    match value {
        Some(true) => Some(true),
        _ => None,
    }
}

/// Enforces the dispatcher-ownership invariant.
///
/// Once `usuario_despacho` is set, only that user may further modify the
/// incident through the update or assignment paths.
fn validate_despachador(image: &NovedadImage, actor: Actor) -> Result<(), CoreError> {
    match image.usuario_despacho {
        Some(duenio) if duenio != actor.usuario_id => {
            Err(CoreError::DomainViolation(DomainError::DispatchOwnership {
                usuario_despacho: duenio,
                actor: actor.usuario_id,
            }))
        }
        _ => Ok(()),
    }
}

/// Derives the response time when arrival is recorded for the first time.
///
/// Returns the minutes from occurrence to arrival, or `None` when the
/// record already carries an arrival or a derived response time. Later
/// arrival corrections never recompute the value.
fn derivar_tiempo_respuesta(
    image: &NovedadImage,
    fecha_llegada: Option<DateTime<Utc>>,
) -> Option<i64> {
    let llegada: DateTime<Utc> = fecha_llegada?;
    if image.fecha_llegada.is_some() || image.tiempo_respuesta_min.is_some() {
        return None;
    }
    Some(minutos_entre(image.fecha_ocurrencia, llegada))
}

/// Decides whether a status change happened and builds its history entry.
///
/// This is the update-path replacement for the source system's database
/// trigger: it fires only when the target status is present and differs
/// from the pre-update image, never on creation, and never when other
/// fields change with the status staying put. Elapsed time is measured
/// from the row's previous `updated_at`. Caller overrides, when given,
/// are merged over the computed fields; the entry count stays at one.
#[must_use]
pub fn plan_status_transition(
    image: &NovedadImage,
    estado_nuevo_id: Option<i64>,
    actor: Actor,
    now: DateTime<Utc>,
    observaciones: Option<String>,
    overrides: Option<&HistorialOverride>,
) -> Option<CambioEstado> {
    let nuevo: i64 = estado_nuevo_id?;
    if nuevo == image.estado_novedad_id {
        return None;
    }

    let entry: CambioEstado = CambioEstado::new(
        Some(image.estado_novedad_id),
        nuevo,
        actor,
        Some(minutos_entre(image.updated_at, now)),
        observaciones,
        now,
    );

    Some(match overrides {
        Some(o) => entry.with_overrides(o),
        None => entry,
    })
}

/// Plans the creation of an incident.
///
/// # Arguments
///
/// * `input` - The creation command
/// * `prioridad_subtipo` - The subtype's default priority, if configured
/// * `estado_inicial` - The catalog's unique initial status
/// * `last_code` - The highest persisted code, read under the lock
/// * `actor` - The creating user
/// * `now` - The transaction instant
/// * `zona` - The display timezone used for the turno classification
///
/// # Errors
///
/// Returns an error if a field validation fails or the code sequence
/// cannot be advanced.
pub fn plan_create(
    input: &CreateNovedad,
    prioridad_subtipo: Option<Prioridad>,
    estado_inicial: &EstadoNovedad,
    last_code: Option<&str>,
    actor: Actor,
    now: DateTime<Utc>,
    zona: Tz,
) -> Result<CreatePlan, CoreError> {
    if input.tipo_novedad_id <= 0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidReferencia {
            field: "tipo_novedad_id",
            value: input.tipo_novedad_id,
        }));
    }
    if input.subtipo_novedad_id <= 0 {
        return Err(CoreError::DomainViolation(DomainError::InvalidReferencia {
            field: "subtipo_novedad_id",
            value: input.subtipo_novedad_id,
        }));
    }
    if let Some(ubicacion) = &input.ubicacion {
        validate_ubicacion(ubicacion)?;
    }
    if let (Some(latitud), Some(longitud)) = (input.latitud, input.longitud) {
        validate_coordenadas(latitud, longitud)?;
    }
    validate_reportante(
        input.es_anonimo,
        input.reportante_nombre.as_deref(),
        input.reportante_telefono.as_deref(),
    )?;

    let fecha_ocurrencia: DateTime<Utc> = input.fecha_ocurrencia.unwrap_or(now);
    let code: NovedadCode = NovedadCode::next_after(last_code)?;

    let historial: CambioEstado = CambioEstado::new(
        None,
        estado_inicial.estado_novedad_id,
        actor,
        None,
        Some(String::from(OBSERVACION_CREACION)),
        now,
    );

    Ok(CreatePlan {
        code,
        turno: turno_para(fecha_ocurrencia, zona),
        prioridad: prioridad_subtipo.unwrap_or_default(),
        estado_novedad_id: estado_inicial.estado_novedad_id,
        fecha_ocurrencia,
        fecha_reporte: now,
        historial,
    })
}

/// Plans a generic update.
///
/// Absent patch fields leave the stored columns untouched. A status
/// change is detected and recorded by [`plan_status_transition`]; this
/// path never supplies notes or overrides for that entry.
///
/// # Errors
///
/// Returns an error if the dispatcher-ownership invariant is violated or
/// a field validation fails.
pub fn plan_update(
    image: &NovedadImage,
    patch: &NovedadPatch,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<TransitionPlan, CoreError> {
    validate_despachador(image, actor)?;

    if let Some(ubicacion) = &patch.ubicacion {
        validate_ubicacion(ubicacion)?;
    }
    if let (Some(latitud), Some(longitud)) = (patch.latitud, patch.longitud) {
        validate_coordenadas(latitud, longitud)?;
    }

    let cambios: NovedadCambios = NovedadCambios {
        estado_novedad_id: patch.estado_novedad_id,
        prioridad_actual: patch.prioridad_actual,
        descripcion: patch.descripcion.clone(),
        ubicacion: patch.ubicacion.clone(),
        direccion_id: patch.direccion_id,
        cuadrante_id: patch.cuadrante_id,
        latitud: patch.latitud,
        longitud: patch.longitud,
        unidad_oficina_id: patch.unidad_oficina_id,
        vehiculo_id: patch.vehiculo_id,
        personal_1_id: patch.personal_1_id,
        personal_2_id: patch.personal_2_id,
        personal_3_id: patch.personal_3_id,
        personal_4_id: patch.personal_4_id,
        km_inicial: patch.km_inicial,
        km_final: patch.km_final,
        fecha_llegada: patch.fecha_llegada,
        fecha_cierre: patch.fecha_cierre,
        observaciones: patch.observaciones.clone(),
        tiempo_respuesta_min: derivar_tiempo_respuesta(image, patch.fecha_llegada),
        ..NovedadCambios::default()
    };

    let historial: Option<CambioEstado> =
        plan_status_transition(image, patch.estado_novedad_id, actor, now, None, None);

    Ok(TransitionPlan { cambios, historial })
}

/// Plans a resource assignment (dispatch).
///
/// Optional fields follow the falsy-skip rule: `0`, `false` and empty
/// strings leave the stored columns untouched. The dispatch timestamp is
/// always written, including on re-dispatch, and the first dispatcher is
/// recorded permanently. The caller's `historial` payload, if any, is
/// merged over the single history entry the transition engine produces.
///
/// # Arguments
///
/// * `image` - The locked pre-update row image
/// * `asignacion` - The assignment command
/// * `estado_resuelto` - The target status the caller resolved: the
///   explicit request id, or the first active "dispatched" catalog match,
///   or `None` to leave the status unchanged
/// * `actor` - The dispatching user
/// * `now` - The transaction instant
///
/// # Errors
///
/// Returns an error if the dispatcher-ownership invariant is violated.
pub fn plan_asignacion(
    image: &NovedadImage,
    asignacion: &AsignacionRecursos,
    estado_resuelto: Option<i64>,
    actor: Actor,
    now: DateTime<Utc>,
) -> Result<TransitionPlan, CoreError> {
    validate_despachador(image, actor)?;

    let cambios: NovedadCambios = NovedadCambios {
        estado_novedad_id: estado_resuelto,
        unidad_oficina_id: presente_id(asignacion.unidad_oficina_id),
        vehiculo_id: presente_id(asignacion.vehiculo_id),
        personal_2_id: presente_id(asignacion.personal_2_id),
        personal_3_id: presente_id(asignacion.personal_3_id),
        personal_4_id: presente_id(asignacion.personal_4_id),
        km_inicial: presente_medida(asignacion.km_inicial),
        km_final: presente_medida(asignacion.km_final),
        turno: asignacion.turno,
        observaciones: presente_texto(asignacion.observaciones.as_ref()),
        // Written on every call; re-dispatch refreshes the timestamp.
        fecha_despacho: Some(asignacion.fecha_despacho.unwrap_or(now)),
        fecha_llegada: asignacion.fecha_llegada,
        requiere_seguimiento: presente_flag(asignacion.requiere_seguimiento),
        fecha_seguimiento: asignacion.fecha_seguimiento,
        perdidas_materiales: presente_medida(asignacion.perdidas_materiales),
        usuario_despacho: match image.usuario_despacho {
            // First dispatcher wins permanently.
            None => Some(actor.usuario_id),
            Some(_) => None,
        },
        tiempo_respuesta_min: derivar_tiempo_respuesta(image, asignacion.fecha_llegada),
        ..NovedadCambios::default()
    };

    let historial: Option<CambioEstado> = plan_status_transition(
        image,
        estado_resuelto,
        actor,
        now,
        Some(String::from(OBSERVACION_DESPACHO)),
        asignacion.historial.as_ref(),
    );

    Ok(TransitionPlan { cambios, historial })
}
