// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use sereno::CreateNovedad;
use sereno_historial::Actor;

use crate::{NuevoEstadoNovedad, Persistence};

/// Seeded catalog and user ids for a fresh in-memory database.
pub struct Fixture {
    pub persistence: Persistence,
    pub estado_pendiente: i64,
    pub estado_en_ruta: i64,
    pub estado_cerrada: i64,
    pub tipo: i64,
    pub subtipo_alta: i64,
    pub subtipo_sin_prioridad: i64,
    pub usuario_1: i64,
    pub usuario_2: i64,
}

pub fn zona_test() -> Tz {
    chrono_tz::UTC
}

pub fn instante(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, h, m, 0).unwrap()
}

pub fn nuevo_estado(nombre: &str, orden: i32, es_inicial: bool, es_final: bool) -> NuevoEstadoNovedad {
    NuevoEstadoNovedad {
        nombre: nombre.to_string(),
        color: Some(String::from("#cccccc")),
        icono: None,
        orden,
        es_inicial,
        es_final,
        requiere_unidad: nombre == "EN RUTA",
    }
}

/// Builds an in-memory database with the standard test catalog.
pub fn setup() -> Fixture {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");

    let estado_pendiente = persistence
        .seed_estado(&nuevo_estado("PENDIENTE", 1, true, false))
        .expect("seed estado");
    let estado_en_ruta = persistence
        .seed_estado(&nuevo_estado("EN RUTA", 2, false, false))
        .expect("seed estado");
    let estado_cerrada = persistence
        .seed_estado(&nuevo_estado("CERRADA", 3, false, true))
        .expect("seed estado");

    let tipo = persistence
        .seed_tipo("SEGURIDAD CIUDADANA")
        .expect("seed tipo");
    let subtipo_alta = persistence
        .seed_subtipo(tipo, "RIÑA CALLEJERA", Some("ALTA"))
        .expect("seed subtipo");
    let subtipo_sin_prioridad = persistence
        .seed_subtipo(tipo, "RUIDO EXCESIVO", None)
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
        estado_cerrada,
        tipo,
        subtipo_alta,
        subtipo_sin_prioridad,
        usuario_1,
        usuario_2,
    }
}

pub fn create_valid_input(fixture: &Fixture) -> CreateNovedad {
    CreateNovedad {
        tipo_novedad_id: fixture.tipo,
        subtipo_novedad_id: fixture.subtipo_alta,
        fecha_ocurrencia: Some(instante(9, 0)),
        ubicacion: Some(String::from("Av. Amazonas y Naciones Unidas")),
        direccion_id: None,
        cuadrante_id: None,
        latitud: Some(-0.176),
        longitud: Some(-78.485),
        descripcion: Some(String::from("Riña en vía pública")),
        reportante_nombre: Some(String::from("Juan Pérez")),
        reportante_telefono: Some(String::from("0999999999")),
        es_anonimo: false,
    }
}

pub fn actor_1(fixture: &Fixture) -> Actor {
    Actor::new(fixture.usuario_1)
}

pub fn actor_2(fixture: &Fixture) -> Actor {
    Actor::new(fixture.usuario_2)
}
