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
    clippy::all
)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

use sereno_historial::Actor;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    actualizar_novedad, asignar_recursos, crear_novedad, eliminar_novedad, listar_estados,
    listar_novedades, obtener_historial, obtener_novedad,
};
pub use request_response::{
    ActualizarNovedadRequest, ApiEnvelope, AsignarRecursosRequest, CrearNovedadRequest,
    EliminarNovedadResponse, EstadoNovedadInfo, HistorialPayload, RequestParseError,
};

/// Resolves the actor identity injected by the upstream gateway.
///
/// Authentication (JWT) and permission checks happen upstream; what
/// reaches this layer is the authenticated user's numeric id in the
/// `x-usuario-id` header. A missing or malformed value means the request
/// did not come through the gateway.
///
/// # Arguments
///
/// * `header` - The raw header value, if present
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the header is missing or
/// not a positive integer.
pub fn authenticate_actor(header: Option<&str>) -> Result<Actor, ApiError> {
    let value: &str = header.ok_or_else(|| ApiError::AuthenticationFailed {
        reason: String::from("Missing x-usuario-id header"),
    })?;

    let usuario_id: i64 = value
        .trim()
        .parse()
        .map_err(|_| ApiError::AuthenticationFailed {
            reason: format!("Invalid x-usuario-id header: '{value}'"),
        })?;

    if usuario_id <= 0 {
        return Err(ApiError::AuthenticationFailed {
            reason: format!("Invalid x-usuario-id header: '{value}'"),
        });
    }

    Ok(Actor::new(usuario_id))
}
