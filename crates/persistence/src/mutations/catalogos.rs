// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Catalog and user seeding mutations.
//!
//! Catalog CRUD proper lives outside this core; these inserts exist for
//! deployment seeding and test fixtures.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NuevoEstadoNovedad;
use crate::diesel_schema::{estados_novedad, subtipos_novedad, tipos_novedad, usuarios};
use crate::error::PersistenceError;

backend_fn! {

/// Inserts a status catalog entry and returns its id.
pub fn insert_estado(
    conn: &mut _,
    nuevo: &NuevoEstadoNovedad,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(estados_novedad::table)
        .values((
            estados_novedad::nombre.eq(&nuevo.nombre),
            estados_novedad::color.eq(nuevo.color.as_deref()),
            estados_novedad::icono.eq(nuevo.icono.as_deref()),
            estados_novedad::orden.eq(nuevo.orden),
            estados_novedad::es_inicial.eq(i32::from(nuevo.es_inicial)),
            estados_novedad::es_final.eq(i32::from(nuevo.es_final)),
            estados_novedad::requiere_unidad.eq(i32::from(nuevo.requiere_unidad)),
            estados_novedad::activo.eq(1),
        ))
        .execute(conn)?;

    let estado_novedad_id: i64 = conn.get_last_insert_rowid()?;
    info!(estado_novedad_id, nombre = %nuevo.nombre, "Seeded status catalog entry");
    Ok(estado_novedad_id)
}

}

backend_fn! {

/// Inserts an incident type and returns its id.
pub fn insert_tipo(conn: &mut _, nombre: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(tipos_novedad::table)
        .values((
            tipos_novedad::nombre.eq(nombre),
            tipos_novedad::activo.eq(1),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Inserts an incident subtype and returns its id.
pub fn insert_subtipo(
    conn: &mut _,
    tipo_novedad_id: i64,
    nombre: &str,
    prioridad_default: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(subtipos_novedad::table)
        .values((
            subtipos_novedad::tipo_novedad_id.eq(tipo_novedad_id),
            subtipos_novedad::nombre.eq(nombre),
            subtipos_novedad::prioridad_default.eq(prioridad_default),
            subtipos_novedad::activo.eq(1),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}

backend_fn! {

/// Inserts a user row and returns its id.
pub fn insert_usuario(
    conn: &mut _,
    login_name: &str,
    nombre_completo: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(usuarios::table)
        .values((
            usuarios::login_name.eq(login_name),
            usuarios::nombre_completo.eq(nombre_completo),
            usuarios::activo.eq(1),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

}
