// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use sereno_domain::{NovedadCode, Prioridad, Turno};
use sereno_historial::CambioEstado;

/// The pre-update image of an incident row.
///
/// Loaded under the row lock at the start of every update-path
/// transaction; the planning functions compare against it to decide
/// ownership, derived fields and status transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovedadImage {
    /// The incident's canonical id.
    pub novedad_id: i64,
    /// The status held before this mutation.
    pub estado_novedad_id: i64,
    /// The user who first dispatched the incident, if any.
    pub usuario_despacho: Option<i64>,
    /// When the incident occurred.
    pub fecha_ocurrencia: DateTime<Utc>,
    /// Arrival timestamp, if already recorded.
    pub fecha_llegada: Option<DateTime<Utc>>,
    /// Response time, if already derived.
    pub tiempo_respuesta_min: Option<i64>,
    /// Last modification instant; elapsed-in-previous-status is measured
    /// from here.
    pub updated_at: DateTime<Utc>,
}

/// The set of column changes a planning function decided to apply.
///
/// `None` fields leave the stored columns untouched. The persistence
/// layer maps this one-to-one onto its changeset type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NovedadCambios {
    /// Target status.
    pub estado_novedad_id: Option<i64>,
    /// Current priority.
    pub prioridad_actual: Option<Prioridad>,
    /// Free-text description.
    pub descripcion: Option<String>,
    /// Free-text location.
    pub ubicacion: Option<String>,
    /// Structured address reference.
    pub direccion_id: Option<i64>,
    /// Patrol-zone reference.
    pub cuadrante_id: Option<i64>,
    /// Latitude in decimal degrees.
    pub latitud: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitud: Option<f64>,
    /// Office/unit reference.
    pub unidad_oficina_id: Option<i64>,
    /// Vehicle reference.
    pub vehiculo_id: Option<i64>,
    /// Primary personnel reference.
    pub personal_1_id: Option<i64>,
    /// Secondary personnel reference.
    pub personal_2_id: Option<i64>,
    /// Secondary personnel reference.
    pub personal_3_id: Option<i64>,
    /// Secondary personnel reference.
    pub personal_4_id: Option<i64>,
    /// Odometer reading at dispatch.
    pub km_inicial: Option<f64>,
    /// Odometer reading at return.
    pub km_final: Option<f64>,
    /// Operational shift.
    pub turno: Option<Turno>,
    /// Free-text operational notes.
    pub observaciones: Option<String>,
    /// First dispatcher; set once and never changed afterwards.
    pub usuario_despacho: Option<i64>,
    /// Dispatch timestamp.
    pub fecha_despacho: Option<DateTime<Utc>>,
    /// Arrival timestamp.
    pub fecha_llegada: Option<DateTime<Utc>>,
    /// Closure timestamp.
    pub fecha_cierre: Option<DateTime<Utc>>,
    /// Follow-up flag.
    pub requiere_seguimiento: Option<bool>,
    /// Follow-up date.
    pub fecha_seguimiento: Option<DateTime<Utc>>,
    /// Estimated material losses.
    pub perdidas_materiales: Option<f64>,
    /// Derived response time; written once when arrival is first set.
    pub tiempo_respuesta_min: Option<i64>,
}

/// The result of planning an incident creation.
///
/// Creation is the only operation whose history entry is produced
/// outside the update-path transition engine, because that engine never
/// fires on inserts.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePlan {
    /// The sequential code assigned to the new incident.
    pub code: NovedadCode,
    /// The shift classification derived from the occurrence hour.
    pub turno: Turno,
    /// The priority taken from the subtype default.
    pub prioridad: Prioridad,
    /// The initial status from the catalog.
    pub estado_novedad_id: i64,
    /// The (possibly defaulted) occurrence instant.
    pub fecha_ocurrencia: DateTime<Utc>,
    /// The report instant.
    pub fecha_reporte: DateTime<Utc>,
    /// The creation history entry (null previous status).
    pub historial: CambioEstado,
}

/// The result of planning an update-path mutation.
///
/// Transitions are atomic: the change set and the optional history entry
/// are persisted in the same transaction or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    /// The column changes to apply.
    pub cambios: NovedadCambios,
    /// The history entry to append, present exactly when the status
    /// changed.
    pub historial: Option<CambioEstado>,
}
