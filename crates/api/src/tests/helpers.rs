// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use sereno_historial::Actor;
use sereno_persistence::{NuevoEstadoNovedad, Persistence};

use crate::CrearNovedadRequest;

pub struct Fixture {
    pub persistence: Persistence,
    pub estado_pendiente: i64,
    pub estado_en_ruta: i64,
    pub tipo: i64,
    pub subtipo: i64,
    pub usuario_1: i64,
    pub usuario_2: i64,
}

pub fn zona_test() -> Tz {
    chrono_tz::UTC
}

pub fn instante(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, h, m, 0).unwrap()
}

pub fn setup() -> Fixture {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let estado_pendiente = persistence
        .seed_estado(&NuevoEstadoNovedad {
            nombre: String::from("PENDIENTE"),
            color: Some(String::from("#f39c12")),
            icono: None,
            orden: 1,
            es_inicial: true,
            es_final: false,
            requiere_unidad: false,
        })
        .expect("seed estado");
    let estado_en_ruta = persistence
        .seed_estado(&NuevoEstadoNovedad {
            nombre: String::from("EN RUTA"),
            color: Some(String::from("#2980b9")),
            icono: None,
            orden: 2,
            es_inicial: false,
            es_final: false,
            requiere_unidad: true,
        })
        .expect("seed estado");

    let tipo = persistence.seed_tipo("SEGURIDAD CIUDADANA").expect("seed tipo");
    let subtipo = persistence
        .seed_subtipo(tipo, "RIÑA CALLEJERA", Some("ALTA"))
        .expect("seed subtipo");

    let usuario_1 = persistence
        .seed_usuario("OPERADOR1", "Operador Uno")
        .expect("seed usuario");
    let usuario_2 = persistence
        .seed_usuario("OPERADOR2", "Operador Dos")
        .expect("seed usuario");

    Fixture {
        persistence,
        estado_pendiente,
        estado_en_ruta,
        tipo,
        subtipo,
        usuario_1,
        usuario_2,
    }
}

pub fn create_valid_request(fixture: &Fixture) -> CrearNovedadRequest {
    CrearNovedadRequest {
        tipo_novedad_id: fixture.tipo,
        subtipo_novedad_id: fixture.subtipo,
        fecha_ocurrencia: Some(String::from("2025-01-01T09:00:00Z")),
        ubicacion: Some(String::from("Av. Amazonas y Naciones Unidas")),
        descripcion: Some(String::from("Riña en vía pública")),
        reportante_nombre: Some(String::from("Juan Pérez")),
        ..CrearNovedadRequest::default()
    }
}

pub fn actor_1(fixture: &Fixture) -> Actor {
    Actor::new(fixture.usuario_1)
}

pub fn actor_2(fixture: &Fixture) -> Actor {
    Actor::new(fixture.usuario_2)
}
