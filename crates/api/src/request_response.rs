// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sereno::{AsignacionRecursos, CreateNovedad, NovedadPatch};
use sereno_domain::{EstadoNovedad, Prioridad, Turno, parse_fecha};
use sereno_historial::HistorialOverride;
use thiserror::Error;

/// Errors raised while turning wire payloads into core commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestParseError {
    /// A timestamp field is not valid RFC 3339.
    #[error("invalid timestamp: {message}")]
    InvalidFecha {
        /// The offending field.
        field: &'static str,
        /// The parser's message.
        message: String,
    },
    /// A priority field is not ALTA/MEDIA/BAJA.
    #[error("invalid priority '{value}'")]
    InvalidPrioridad {
        /// The offending value.
        value: String,
    },
    /// A turno field is not MAÑANA/TARDE/NOCHE.
    #[error("invalid turno '{value}'")]
    InvalidTurno {
        /// The offending value.
        value: String,
    },
}

impl RequestParseError {
    /// The field the error belongs to, for the 400 breakdown.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidFecha { field, .. } => field,
            Self::InvalidPrioridad { .. } => "prioridad",
            Self::InvalidTurno { .. } => "turno",
        }
    }
}

fn parse_fecha_opt(
    value: Option<&String>,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, RequestParseError> {
    value
        .map(|v| {
            parse_fecha(v).map_err(|e| RequestParseError::InvalidFecha {
                field,
                message: e.to_string(),
            })
        })
        .transpose()
}

fn parse_prioridad_opt(value: Option<&String>) -> Result<Option<Prioridad>, RequestParseError> {
    value
        .map(|v| {
            v.parse().map_err(|_| RequestParseError::InvalidPrioridad {
                value: v.clone(),
            })
        })
        .transpose()
}

fn parse_turno_opt(value: Option<&String>) -> Result<Option<Turno>, RequestParseError> {
    value
        .map(|v| {
            v.parse()
                .map_err(|_| RequestParseError::InvalidTurno { value: v.clone() })
        })
        .transpose()
}

/// API request to create an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CrearNovedadRequest {
    /// Incident type id.
    pub tipo_novedad_id: i64,
    /// Incident subtype id.
    pub subtipo_novedad_id: i64,
    /// Occurrence timestamp (RFC 3339); defaults to now when absent.
    pub fecha_ocurrencia: Option<String>,
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
    /// Free-text description.
    pub descripcion: Option<String>,
    /// Reporter name.
    pub reportante_nombre: Option<String>,
    /// Reporter phone.
    pub reportante_telefono: Option<String>,
    /// Anonymous-report flag.
    #[serde(default)]
    pub es_anonimo: bool,
}

impl CrearNovedadRequest {
    /// Converts the wire payload into the core creation command.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp does not parse.
    pub fn to_command(&self) -> Result<CreateNovedad, RequestParseError> {
        Ok(CreateNovedad {
            tipo_novedad_id: self.tipo_novedad_id,
            subtipo_novedad_id: self.subtipo_novedad_id,
            fecha_ocurrencia: parse_fecha_opt(
                self.fecha_ocurrencia.as_ref(),
                "fecha_ocurrencia",
            )?,
            ubicacion: self.ubicacion.clone(),
            direccion_id: self.direccion_id,
            cuadrante_id: self.cuadrante_id,
            latitud: self.latitud,
            longitud: self.longitud,
            descripcion: self.descripcion.clone(),
            reportante_nombre: self.reportante_nombre.clone(),
            reportante_telefono: self.reportante_telefono.clone(),
            es_anonimo: self.es_anonimo,
        })
    }
}

/// API request for the generic update operation.
///
/// Absent fields leave the stored columns untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActualizarNovedadRequest {
    /// Target status id.
    pub estado_novedad_id: Option<i64>,
    /// Current priority (ALTA/MEDIA/BAJA).
    pub prioridad_actual: Option<String>,
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
    /// Arrival timestamp (RFC 3339).
    pub fecha_llegada: Option<String>,
    /// Closure timestamp (RFC 3339).
    pub fecha_cierre: Option<String>,
    /// Free-text operational notes.
    pub observaciones: Option<String>,
}

impl ActualizarNovedadRequest {
    /// Converts the wire payload into the core patch command.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp or priority does not parse.
    pub fn to_command(&self) -> Result<NovedadPatch, RequestParseError> {
        Ok(NovedadPatch {
            estado_novedad_id: self.estado_novedad_id,
            prioridad_actual: parse_prioridad_opt(self.prioridad_actual.as_ref())?,
            descripcion: self.descripcion.clone(),
            ubicacion: self.ubicacion.clone(),
            direccion_id: self.direccion_id,
            cuadrante_id: self.cuadrante_id,
            latitud: self.latitud,
            longitud: self.longitud,
            unidad_oficina_id: self.unidad_oficina_id,
            vehiculo_id: self.vehiculo_id,
            personal_1_id: self.personal_1_id,
            personal_2_id: self.personal_2_id,
            personal_3_id: self.personal_3_id,
            personal_4_id: self.personal_4_id,
            km_inicial: self.km_inicial,
            km_final: self.km_final,
            fecha_llegada: parse_fecha_opt(self.fecha_llegada.as_ref(), "fecha_llegada")?,
            fecha_cierre: parse_fecha_opt(self.fecha_cierre.as_ref(), "fecha_cierre")?,
            observaciones: self.observaciones.clone(),
        })
    }
}

/// Frontend-supplied history metadata for the assignment operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HistorialPayload {
    /// Previous-status override.
    pub estado_anterior_id: Option<i64>,
    /// Next-status override.
    pub estado_nuevo_id: Option<i64>,
    /// Elapsed-minutes override.
    pub tiempo_transcurrido_min: Option<i64>,
    /// Free-text notes.
    pub observaciones: Option<String>,
    /// Arbitrary metadata blob.
    pub metadata: Option<serde_json::Value>,
    /// Creator override.
    pub created_by: Option<i64>,
}

impl HistorialPayload {
    fn to_override(&self) -> HistorialOverride {
        HistorialOverride {
            estado_anterior_id: self.estado_anterior_id,
            estado_nuevo_id: self.estado_nuevo_id,
            tiempo_transcurrido_min: self.tiempo_transcurrido_min,
            observaciones: self.observaciones.clone(),
            metadata: self.metadata.clone(),
            created_by: self.created_by,
        }
    }
}

/// API request for the resource-assignment (dispatch) operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AsignarRecursosRequest {
    /// Explicit target status id.
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
    /// Operational shift override (MAÑANA/TARDE/NOCHE).
    pub turno: Option<String>,
    /// Free-text operational notes.
    pub observaciones: Option<String>,
    /// Dispatch timestamp (RFC 3339); defaults to now.
    pub fecha_despacho: Option<String>,
    /// Arrival timestamp (RFC 3339).
    pub fecha_llegada: Option<String>,
    /// Follow-up flag.
    pub requiere_seguimiento: Option<bool>,
    /// Follow-up date (RFC 3339).
    pub fecha_seguimiento: Option<String>,
    /// Estimated material losses.
    pub perdidas_materiales: Option<f64>,
    /// Frontend-supplied history metadata.
    pub historial: Option<HistorialPayload>,
}

impl AsignarRecursosRequest {
    /// Converts the wire payload into the core assignment command.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp or turno does not parse.
    pub fn to_command(&self) -> Result<AsignacionRecursos, RequestParseError> {
        Ok(AsignacionRecursos {
            estado_novedad_id: self.estado_novedad_id,
            unidad_oficina_id: self.unidad_oficina_id,
            vehiculo_id: self.vehiculo_id,
            personal_2_id: self.personal_2_id,
            personal_3_id: self.personal_3_id,
            personal_4_id: self.personal_4_id,
            km_inicial: self.km_inicial,
            km_final: self.km_final,
            turno: parse_turno_opt(self.turno.as_ref())?,
            observaciones: self.observaciones.clone(),
            fecha_despacho: parse_fecha_opt(self.fecha_despacho.as_ref(), "fecha_despacho")?,
            fecha_llegada: parse_fecha_opt(self.fecha_llegada.as_ref(), "fecha_llegada")?,
            requiere_seguimiento: self.requiere_seguimiento,
            fecha_seguimiento: parse_fecha_opt(
                self.fecha_seguimiento.as_ref(),
                "fecha_seguimiento",
            )?,
            perdidas_materiales: self.perdidas_materiales,
            historial: self.historial.as_ref().map(HistorialPayload::to_override),
        })
    }
}

/// Acknowledgment for the soft-delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminarNovedadResponse {
    /// The id of the deleted incident.
    pub novedad_id: i64,
}

/// Serializable view of a status catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstadoNovedadInfo {
    /// Canonical id.
    pub estado_novedad_id: i64,
    /// Display name.
    pub nombre: String,
    /// Display color.
    pub color: Option<String>,
    /// Display icon.
    pub icono: Option<String>,
    /// Ordering rank.
    pub orden: i32,
    /// Whether new incidents start here.
    pub es_inicial: bool,
    /// Whether the status is terminal (advisory).
    pub es_final: bool,
    /// Whether the status expects an assigned unit (advisory).
    pub requiere_unidad: bool,
}

impl From<EstadoNovedad> for EstadoNovedadInfo {
    fn from(estado: EstadoNovedad) -> Self {
        Self {
            estado_novedad_id: estado.estado_novedad_id,
            nombre: estado.nombre,
            color: estado.color,
            icono: estado.icono,
            orden: estado.orden,
            es_inicial: estado.es_inicial,
            es_final: estado.es_final,
            requiere_unidad: estado.requiere_unidad,
        }
    }
}

/// The uniform response envelope.
///
/// Every endpoint responds with `{success, message, data?, error?}`;
/// `error` carries the stable machine-readable code on failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// A human-readable message.
    pub message: String,
    /// The payload, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// The stable machine-readable error code, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Builds a success envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Builds a failure envelope from an API error.
    #[must_use]
    pub fn failure(err: &crate::ApiError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            data: None,
            error: Some(err.codigo().to_string()),
        }
    }
}
