// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident classification catalog queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::SubtipoData;
use crate::diesel_schema::subtipos_novedad;
use crate::error::PersistenceError;

/// Diesel Queryable struct for subtype rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = subtipos_novedad)]
struct SubtipoRow {
    subtipo_novedad_id: i64,
    tipo_novedad_id: i64,
    nombre: String,
    prioridad_default: Option<String>,
    activo: i32,
}

backend_fn! {

/// Retrieves an active subtype by id.
///
/// Returns `Ok(None)` when the subtype does not exist or is inactive;
/// creation turns that into a not-found rejection.
pub fn get_subtipo(
    conn: &mut _,
    subtipo_novedad_id: i64,
) -> Result<Option<SubtipoData>, PersistenceError> {
    let row: Option<SubtipoRow> = subtipos_novedad::table
        .filter(subtipos_novedad::subtipo_novedad_id.eq(subtipo_novedad_id))
        .filter(subtipos_novedad::activo.eq(1))
        .select(SubtipoRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(|r| SubtipoData {
        subtipo_novedad_id: r.subtipo_novedad_id,
        tipo_novedad_id: r.tipo_novedad_id,
        nombre: r.nombre,
        prioridad_default: r.prioridad_default,
        activo: r.activo != 0,
    }))
}

}
