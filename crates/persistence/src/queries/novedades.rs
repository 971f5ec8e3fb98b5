// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident query operations.
//!
//! Soft-deleted incidents are excluded from every function here except
//! `novedad_exists`, which the history endpoint uses: history remains
//! queryable after soft deletion.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{NovedadData, NovedadDetalle};
use crate::diesel_schema::{estados_novedad, novedades, subtipos_novedad, tipos_novedad};
use crate::error::PersistenceError;

/// Diesel Queryable struct for full incident rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = novedades)]
pub(crate) struct NovedadRow {
    pub(crate) novedad_id: i64,
    pub(crate) novedad_code: String,
    pub(crate) tipo_novedad_id: i64,
    pub(crate) subtipo_novedad_id: i64,
    pub(crate) prioridad_actual: String,
    pub(crate) turno: String,
    pub(crate) descripcion: Option<String>,
    pub(crate) ubicacion: Option<String>,
    pub(crate) direccion_id: Option<i64>,
    pub(crate) cuadrante_id: Option<i64>,
    pub(crate) latitud: Option<f64>,
    pub(crate) longitud: Option<f64>,
    pub(crate) reportante_nombre: Option<String>,
    pub(crate) reportante_telefono: Option<String>,
    pub(crate) es_anonimo: i32,
    pub(crate) estado_novedad_id: i64,
    pub(crate) unidad_oficina_id: Option<i64>,
    pub(crate) vehiculo_id: Option<i64>,
    pub(crate) personal_1_id: Option<i64>,
    pub(crate) personal_2_id: Option<i64>,
    pub(crate) personal_3_id: Option<i64>,
    pub(crate) personal_4_id: Option<i64>,
    pub(crate) km_inicial: Option<f64>,
    pub(crate) km_final: Option<f64>,
    pub(crate) observaciones: Option<String>,
    pub(crate) usuario_despacho: Option<i64>,
    pub(crate) fecha_ocurrencia: String,
    pub(crate) fecha_reporte: String,
    pub(crate) fecha_despacho: Option<String>,
    pub(crate) fecha_llegada: Option<String>,
    pub(crate) fecha_cierre: Option<String>,
    pub(crate) requiere_seguimiento: i32,
    pub(crate) fecha_seguimiento: Option<String>,
    pub(crate) perdidas_materiales: Option<f64>,
    pub(crate) tiempo_respuesta_min: Option<i64>,
    pub(crate) activo: i32,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
    pub(crate) created_by: i64,
    pub(crate) updated_by: Option<i64>,
    pub(crate) deleted_at: Option<String>,
    pub(crate) deleted_by: Option<i64>,
}

/// Maps an incident row to the public data struct.
pub(crate) fn to_data(row: NovedadRow) -> NovedadData {
    NovedadData {
        novedad_id: row.novedad_id,
        novedad_code: row.novedad_code,
        tipo_novedad_id: row.tipo_novedad_id,
        subtipo_novedad_id: row.subtipo_novedad_id,
        prioridad_actual: row.prioridad_actual,
        turno: row.turno,
        descripcion: row.descripcion,
        ubicacion: row.ubicacion,
        direccion_id: row.direccion_id,
        cuadrante_id: row.cuadrante_id,
        latitud: row.latitud,
        longitud: row.longitud,
        reportante_nombre: row.reportante_nombre,
        reportante_telefono: row.reportante_telefono,
        es_anonimo: row.es_anonimo != 0,
        estado_novedad_id: row.estado_novedad_id,
        unidad_oficina_id: row.unidad_oficina_id,
        vehiculo_id: row.vehiculo_id,
        personal_1_id: row.personal_1_id,
        personal_2_id: row.personal_2_id,
        personal_3_id: row.personal_3_id,
        personal_4_id: row.personal_4_id,
        km_inicial: row.km_inicial,
        km_final: row.km_final,
        observaciones: row.observaciones,
        usuario_despacho: row.usuario_despacho,
        fecha_ocurrencia: row.fecha_ocurrencia,
        fecha_reporte: row.fecha_reporte,
        fecha_despacho: row.fecha_despacho,
        fecha_llegada: row.fecha_llegada,
        fecha_cierre: row.fecha_cierre,
        requiere_seguimiento: row.requiere_seguimiento != 0,
        fecha_seguimiento: row.fecha_seguimiento,
        perdidas_materiales: row.perdidas_materiales,
        tiempo_respuesta_min: row.tiempo_respuesta_min,
        created_at: row.created_at,
        updated_at: row.updated_at,
        created_by: row.created_by,
        updated_by: row.updated_by,
    }
}

backend_fn! {

/// Retrieves an active incident with joined display data.
///
/// Returns `Ok(None)` when the incident does not exist or is
/// soft-deleted.
pub fn get_novedad_detalle(
    conn: &mut _,
    novedad_id: i64,
) -> Result<Option<NovedadDetalle>, PersistenceError> {
    let row: Option<NovedadRow> = novedades::table
        .filter(novedades::novedad_id.eq(novedad_id))
        .filter(novedades::activo.eq(1))
        .select(NovedadRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };

    let (estado_nombre, estado_color): (String, Option<String>) = estados_novedad::table
        .filter(estados_novedad::estado_novedad_id.eq(row.estado_novedad_id))
        .select((estados_novedad::nombre, estados_novedad::color))
        .first(conn)?;

    let tipo_nombre: String = tipos_novedad::table
        .filter(tipos_novedad::tipo_novedad_id.eq(row.tipo_novedad_id))
        .select(tipos_novedad::nombre)
        .first(conn)?;

    let subtipo_nombre: String = subtipos_novedad::table
        .filter(subtipos_novedad::subtipo_novedad_id.eq(row.subtipo_novedad_id))
        .select(subtipos_novedad::nombre)
        .first(conn)?;

    Ok(Some(NovedadDetalle {
        novedad: to_data(row),
        estado_nombre,
        estado_color,
        tipo_nombre,
        subtipo_nombre,
    }))
}

}

backend_fn! {

/// Lists active incidents, newest first, with joined display data.
pub fn list_novedades(conn: &mut _) -> Result<Vec<NovedadDetalle>, PersistenceError> {
    let rows: Vec<NovedadRow> = novedades::table
        .filter(novedades::activo.eq(1))
        .order(novedades::novedad_id.desc())
        .select(NovedadRow::as_select())
        .load(conn)?;

    let estados: HashMap<i64, (String, Option<String>)> = estados_novedad::table
        .select((
            estados_novedad::estado_novedad_id,
            estados_novedad::nombre,
            estados_novedad::color,
        ))
        .load::<(i64, String, Option<String>)>(conn)?
        .into_iter()
        .map(|(id, nombre, color)| (id, (nombre, color)))
        .collect();

    let tipos: HashMap<i64, String> = tipos_novedad::table
        .select((tipos_novedad::tipo_novedad_id, tipos_novedad::nombre))
        .load::<(i64, String)>(conn)?
        .into_iter()
        .collect();

    let subtipos: HashMap<i64, String> = subtipos_novedad::table
        .select((
            subtipos_novedad::subtipo_novedad_id,
            subtipos_novedad::nombre,
        ))
        .load::<(i64, String)>(conn)?
        .into_iter()
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| {
            let (estado_nombre, estado_color): (String, Option<String>) = estados
                .get(&row.estado_novedad_id)
                .cloned()
                .unwrap_or_else(|| (String::from("DESCONOCIDO"), None));
            let tipo_nombre: String = tipos
                .get(&row.tipo_novedad_id)
                .cloned()
                .unwrap_or_default();
            let subtipo_nombre: String = subtipos
                .get(&row.subtipo_novedad_id)
                .cloned()
                .unwrap_or_default();
            NovedadDetalle {
                novedad: to_data(row),
                estado_nombre,
                estado_color,
                tipo_nombre,
                subtipo_nombre,
            }
        })
        .collect())
}

}

backend_fn! {

/// Checks whether an incident row exists at all, soft-deleted included.
///
/// The history endpoint uses this: a deleted incident's ledger stays
/// readable, but a never-existing id is still not-found.
pub fn novedad_exists(conn: &mut _, novedad_id: i64) -> Result<bool, PersistenceError> {
    let found: Option<i64> = novedades::table
        .filter(novedades::novedad_id.eq(novedad_id))
        .select(novedades::novedad_id)
        .first(conn)
        .optional()?;
    Ok(found.is_some())
}

}
