// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, TimeZone, Utc};
use sereno_domain::EstadoNovedad;
use sereno_historial::Actor;

use crate::{CreateNovedad, NovedadImage};

pub const ESTADO_PENDIENTE: i64 = 1;
pub const ESTADO_EN_RUTA: i64 = 2;

pub fn create_test_actor() -> Actor {
    Actor::new(7)
}

pub fn create_other_actor() -> Actor {
    Actor::new(99)
}

pub fn create_test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 14, 30, 0).unwrap()
}

pub fn create_estado_inicial() -> EstadoNovedad {
    EstadoNovedad {
        estado_novedad_id: ESTADO_PENDIENTE,
        nombre: String::from("PENDIENTE"),
        color: Some(String::from("#f39c12")),
        icono: Some(String::from("clock")),
        orden: 1,
        es_inicial: true,
        es_final: false,
        requiere_unidad: false,
        activo: true,
    }
}

pub fn create_valid_input() -> CreateNovedad {
    CreateNovedad {
        tipo_novedad_id: 1,
        subtipo_novedad_id: 1,
        fecha_ocurrencia: Some(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()),
        ubicacion: Some(String::from("Av. Amazonas y Naciones Unidas")),
        direccion_id: None,
        cuadrante_id: Some(4),
        latitud: Some(-0.176),
        longitud: Some(-78.485),
        descripcion: Some(String::from("Riña en vía pública")),
        reportante_nombre: Some(String::from("Juan Pérez")),
        reportante_telefono: Some(String::from("0999999999")),
        es_anonimo: false,
    }
}

/// A freshly created, never-dispatched incident image.
pub fn create_fresh_image() -> NovedadImage {
    NovedadImage {
        novedad_id: 1,
        estado_novedad_id: ESTADO_PENDIENTE,
        usuario_despacho: None,
        fecha_ocurrencia: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap(),
        fecha_llegada: None,
        tiempo_respuesta_min: None,
        updated_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 5, 0).unwrap(),
    }
}

/// An incident already dispatched by the test actor.
pub fn create_dispatched_image() -> NovedadImage {
    NovedadImage {
        usuario_despacho: Some(create_test_actor().usuario_id),
        estado_novedad_id: ESTADO_EN_RUTA,
        ..create_fresh_image()
    }
}
