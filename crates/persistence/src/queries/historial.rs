// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! History ledger query operations.
//!
//! The ledger is append-only and never contended on reads. Entries are
//! returned newest first, joined with status display names and the acting
//! user's display name.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::CambioEstadoData;
use crate::diesel_schema::{estados_novedad, novedades_historial, usuarios};
use crate::error::PersistenceError;

/// Diesel Queryable struct for history rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = novedades_historial)]
struct CambioRow {
    historial_id: i64,
    novedad_id: i64,
    estado_anterior_id: Option<i64>,
    estado_nuevo_id: i64,
    usuario_id: i64,
    tiempo_transcurrido_min: Option<i64>,
    observaciones: Option<String>,
    metadata_json: Option<String>,
    fecha_cambio: String,
}

backend_fn! {

/// Retrieves the history for an incident, newest first.
///
/// Works for soft-deleted incidents too; existence of the incident is
/// the caller's concern.
pub fn get_historial(
    conn: &mut _,
    novedad_id: i64,
) -> Result<Vec<CambioEstadoData>, PersistenceError> {
    let rows: Vec<CambioRow> = novedades_historial::table
        .filter(novedades_historial::novedad_id.eq(novedad_id))
        .order((
            novedades_historial::fecha_cambio.desc(),
            novedades_historial::historial_id.desc(),
        ))
        .select(CambioRow::as_select())
        .load(conn)?;

    // The catalog is small; one load resolves every status name.
    let estados: HashMap<i64, String> = estados_novedad::table
        .select((estados_novedad::estado_novedad_id, estados_novedad::nombre))
        .load::<(i64, String)>(conn)?
        .into_iter()
        .collect();

    let actor_ids: Vec<i64> = rows.iter().map(|r| r.usuario_id).collect();
    let nombres_usuarios: HashMap<i64, String> = usuarios::table
        .filter(usuarios::usuario_id.eq_any(&actor_ids))
        .select((usuarios::usuario_id, usuarios::nombre_completo))
        .load::<(i64, String)>(conn)?
        .into_iter()
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| CambioEstadoData {
            historial_id: row.historial_id,
            novedad_id: row.novedad_id,
            estado_anterior_id: row.estado_anterior_id,
            estado_anterior_nombre: row
                .estado_anterior_id
                .and_then(|id| estados.get(&id).cloned()),
            estado_nuevo_id: row.estado_nuevo_id,
            estado_nuevo_nombre: estados
                .get(&row.estado_nuevo_id)
                .cloned()
                .unwrap_or_else(|| String::from("DESCONOCIDO")),
            usuario_id: row.usuario_id,
            usuario_nombre: nombres_usuarios
                .get(&row.usuario_id)
                .cloned()
                .unwrap_or_else(|| format!("usuario {}", row.usuario_id)),
            tiempo_transcurrido_min: row.tiempo_transcurrido_min,
            observaciones: row.observaciones,
            metadata_json: row.metadata_json,
            fecha_cambio: row.fecha_cambio,
        })
        .collect())
}

}
