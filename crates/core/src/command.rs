// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use sereno_domain::{Prioridad, Turno};
use sereno_historial::HistorialOverride;

/// A command represents caller intent as data only.
///
/// Commands are the only way to request incident mutations; the planning
/// functions in [`crate::apply`] turn them into change sets.
///
/// Input to incident creation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateNovedad {
    /// Incident type id.
    pub tipo_novedad_id: i64,
    /// Incident subtype id; the subtype determines the default priority.
    pub subtipo_novedad_id: i64,
    /// When the incident occurred; defaults to now when absent.
    pub fecha_ocurrencia: Option<DateTime<Utc>>,
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
    /// Free-text description of the incident.
    pub descripcion: Option<String>,
    /// Reporter name; required unless the report is anonymous.
    pub reportante_nombre: Option<String>,
    /// Reporter phone number.
    pub reportante_telefono: Option<String>,
    /// Whether the report is anonymous.
    pub es_anonimo: bool,
}

/// Partial patch for the generic update operation.
///
/// Absent fields leave the stored columns untouched. A present
/// `estado_novedad_id` that differs from the current status makes the
/// transition engine append a history entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NovedadPatch {
    /// Target status id.
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
    /// Arrival timestamp; first arrival triggers the response-time
    /// derivation.
    pub fecha_llegada: Option<DateTime<Utc>>,
    /// Closure timestamp.
    pub fecha_cierre: Option<DateTime<Utc>>,
    /// Free-text operational notes.
    pub observaciones: Option<String>,
}

/// Input to the resource-assignment (dispatch) operation.
///
/// Every optional field follows the falsy-skip rule: `0`, `false` and
/// empty strings are treated as "not provided" and leave the stored
/// column untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AsignacionRecursos {
    /// Explicit target status; takes precedence over the dispatched-status
    /// name lookup.
    pub estado_novedad_id: Option<i64>,
    /// Office/unit reference.
    pub unidad_oficina_id: Option<i64>,
    /// Vehicle reference.
    pub vehiculo_id: Option<i64>,
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
    /// Operational shift override.
    pub turno: Option<Turno>,
    /// Free-text operational notes.
    pub observaciones: Option<String>,
    /// Dispatch timestamp; defaults to now. Always written, including
    /// on re-dispatch.
    pub fecha_despacho: Option<DateTime<Utc>>,
    /// Arrival timestamp.
    pub fecha_llegada: Option<DateTime<Utc>>,
    /// Follow-up flag.
    pub requiere_seguimiento: Option<bool>,
    /// Follow-up date.
    pub fecha_seguimiento: Option<DateTime<Utc>>,
    /// Estimated material losses.
    pub perdidas_materiales: Option<f64>,
    /// Frontend-supplied history metadata merged over the server-computed
    /// entry.
    pub historial: Option<HistorialOverride>,
}
