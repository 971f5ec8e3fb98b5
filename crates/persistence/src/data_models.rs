// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Serializable representation of a persisted incident.
///
/// Timestamps are RFC 3339 UTC strings, exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovedadData {
    pub novedad_id: i64,
    pub novedad_code: String,
    pub tipo_novedad_id: i64,
    pub subtipo_novedad_id: i64,
    pub prioridad_actual: String,
    pub turno: String,
    pub descripcion: Option<String>,
    pub ubicacion: Option<String>,
    pub direccion_id: Option<i64>,
    pub cuadrante_id: Option<i64>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub reportante_nombre: Option<String>,
    pub reportante_telefono: Option<String>,
    pub es_anonimo: bool,
    pub estado_novedad_id: i64,
    pub unidad_oficina_id: Option<i64>,
    pub vehiculo_id: Option<i64>,
    pub personal_1_id: Option<i64>,
    pub personal_2_id: Option<i64>,
    pub personal_3_id: Option<i64>,
    pub personal_4_id: Option<i64>,
    pub km_inicial: Option<f64>,
    pub km_final: Option<f64>,
    pub observaciones: Option<String>,
    pub usuario_despacho: Option<i64>,
    pub fecha_ocurrencia: String,
    pub fecha_reporte: String,
    pub fecha_despacho: Option<String>,
    pub fecha_llegada: Option<String>,
    pub fecha_cierre: Option<String>,
    pub requiere_seguimiento: bool,
    pub fecha_seguimiento: Option<String>,
    pub perdidas_materiales: Option<f64>,
    pub tiempo_respuesta_min: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: i64,
    pub updated_by: Option<i64>,
}

/// An incident joined with its classification and status display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NovedadDetalle {
    /// The incident record.
    pub novedad: NovedadData,
    /// Current status display name.
    pub estado_nombre: String,
    /// Current status display color.
    pub estado_color: Option<String>,
    /// Incident type display name.
    pub tipo_nombre: String,
    /// Incident subtype display name.
    pub subtipo_nombre: String,
}

/// Serializable representation of a history entry joined with display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CambioEstadoData {
    pub historial_id: i64,
    pub novedad_id: i64,
    pub estado_anterior_id: Option<i64>,
    pub estado_anterior_nombre: Option<String>,
    pub estado_nuevo_id: i64,
    pub estado_nuevo_nombre: String,
    pub usuario_id: i64,
    pub usuario_nombre: String,
    pub tiempo_transcurrido_min: Option<i64>,
    pub observaciones: Option<String>,
    pub metadata_json: Option<String>,
    pub fecha_cambio: String,
}

/// Serializable representation of an incident subtype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtipoData {
    pub subtipo_novedad_id: i64,
    pub tipo_novedad_id: i64,
    pub nombre: String,
    pub prioridad_default: Option<String>,
    pub activo: bool,
}

/// Input for seeding a status catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuevoEstadoNovedad {
    pub nombre: String,
    pub color: Option<String>,
    pub icono: Option<String>,
    pub orden: i32,
    pub es_inicial: bool,
    pub es_final: bool,
    pub requiere_unidad: bool,
}
