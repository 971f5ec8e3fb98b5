// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum accepted length for the free-text location field.
const UBICACION_MAX: usize = 500;

/// Validates the free-text location field.
///
/// # Arguments
///
/// * `ubicacion` - The location text to validate
///
/// # Errors
///
/// Returns an error if the location is empty or exceeds the maximum length.
pub fn validate_ubicacion(ubicacion: &str) -> Result<(), DomainError> {
    if ubicacion.trim().is_empty() {
        return Err(DomainError::InvalidUbicacion(String::from(
            "Location cannot be empty",
        )));
    }
    if ubicacion.len() > UBICACION_MAX {
        return Err(DomainError::InvalidUbicacion(format!(
            "Location exceeds {UBICACION_MAX} characters"
        )));
    }
    Ok(())
}

/// Validates a coordinate pair.
///
/// # Errors
///
/// Returns an error if either value falls outside the WGS84 range.
pub fn validate_coordenadas(latitud: f64, longitud: f64) -> Result<(), DomainError> {
    if !(-90.0..=90.0).contains(&latitud) || !(-180.0..=180.0).contains(&longitud) {
        return Err(DomainError::InvalidCoordenadas { latitud, longitud });
    }
    Ok(())
}

/// Validates reporter contact fields.
///
/// An anonymous report must not carry a reporter name or phone; a named
/// report must carry a non-empty name.
///
/// # Errors
///
/// Returns an error if the anonymous flag contradicts the contact fields.
pub fn validate_reportante(
    es_anonimo: bool,
    nombre: Option<&str>,
    telefono: Option<&str>,
) -> Result<(), DomainError> {
    if es_anonimo {
        if nombre.is_some_and(|n| !n.trim().is_empty())
            || telefono.is_some_and(|t| !t.trim().is_empty())
        {
            return Err(DomainError::InvalidReportante(String::from(
                "Anonymous reports cannot carry contact data",
            )));
        }
        return Ok(());
    }

    if nombre.is_none_or(|n| n.trim().is_empty()) {
        return Err(DomainError::InvalidReportante(String::from(
            "Reporter name is required unless the report is anonymous",
        )));
    }

    Ok(())
}
