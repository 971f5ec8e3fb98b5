// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status catalog query operations.
//!
//! The catalog is read-only from the core's perspective: lookups only,
//! no mutations outside the seeding helpers.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use sereno_domain::EstadoNovedad;

use crate::diesel_schema::estados_novedad;
use crate::error::PersistenceError;

/// Diesel Queryable struct for status catalog rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = estados_novedad)]
pub(crate) struct EstadoRow {
    pub(crate) estado_novedad_id: i64,
    pub(crate) nombre: String,
    pub(crate) color: Option<String>,
    pub(crate) icono: Option<String>,
    pub(crate) orden: i32,
    pub(crate) es_inicial: i32,
    pub(crate) es_final: i32,
    pub(crate) requiere_unidad: i32,
    pub(crate) activo: i32,
}

/// Maps a catalog row to the domain type.
pub(crate) fn to_estado(row: EstadoRow) -> EstadoNovedad {
    EstadoNovedad {
        estado_novedad_id: row.estado_novedad_id,
        nombre: row.nombre,
        color: row.color,
        icono: row.icono,
        orden: row.orden,
        es_inicial: row.es_inicial != 0,
        es_final: row.es_final != 0,
        requiere_unidad: row.requiere_unidad != 0,
        activo: row.activo != 0,
    }
}

backend_fn! {

/// Finds the unique active initial status.
///
/// Returns `Ok(None)` when the catalog carries no initial entry; the
/// caller decides whether that is fatal (it is, for creation).
pub fn find_estado_inicial(conn: &mut _) -> Result<Option<EstadoNovedad>, PersistenceError> {
    let row: Option<EstadoRow> = estados_novedad::table
        .filter(estados_novedad::es_inicial.eq(1))
        .filter(estados_novedad::activo.eq(1))
        .order(estados_novedad::estado_novedad_id.asc())
        .select(EstadoRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(to_estado))
}

}

backend_fn! {

/// Finds a status catalog entry by id.
///
/// Inactive entries are returned too; the core validator decides
/// whether an inactive entry is acceptable (it is not, as a target).
pub fn find_estado_by_id(
    conn: &mut _,
    estado_novedad_id: i64,
) -> Result<Option<EstadoNovedad>, PersistenceError> {
    let row: Option<EstadoRow> = estados_novedad::table
        .filter(estados_novedad::estado_novedad_id.eq(estado_novedad_id))
        .select(EstadoRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(to_estado))
}

}

backend_fn! {

/// Resolves the "dispatched" status from an ordered list of display names.
///
/// The first active match **in caller order** wins, not in database
/// order. Absence of every name is non-fatal; dispatch proceeds without
/// a status change.
pub fn find_estado_despacho(
    conn: &mut _,
    nombres: &[&str],
) -> Result<Option<EstadoNovedad>, PersistenceError> {
    let rows: Vec<EstadoRow> = estados_novedad::table
        .filter(estados_novedad::nombre.eq_any(nombres))
        .filter(estados_novedad::activo.eq(1))
        .select(EstadoRow::as_select())
        .load(conn)?;

    let candidatos: Vec<EstadoNovedad> = rows.into_iter().map(to_estado).collect();
    for nombre in nombres {
        if let Some(estado) = candidatos.iter().find(|e| e.nombre == *nombre) {
            return Ok(Some(estado.clone()));
        }
    }
    Ok(None)
}

}

backend_fn! {

/// Lists the active status catalog ordered by rank.
pub fn list_estados(conn: &mut _) -> Result<Vec<EstadoNovedad>, PersistenceError> {
    let rows: Vec<EstadoRow> = estados_novedad::table
        .filter(estados_novedad::activo.eq(1))
        .order(estados_novedad::orden.asc())
        .select(EstadoRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(to_estado).collect())
}

}
