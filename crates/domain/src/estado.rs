// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status catalog entry type.
//!
//! Incident statuses live in a database catalog rather than a closed enum:
//! deployments define their own set, with exactly one active entry marked
//! as initial. The catalog is read-only from the core's perspective.
//! No transition table is enforced; any status is reachable from any other,
//! and `es_final`/`requiere_unidad` are advisory metadata.

use serde::{Deserialize, Serialize};

/// Display names accepted as the "dispatched" status, in resolution order.
///
/// When an assignment request names no explicit target status, the first
/// active catalog entry matching one of these names is adopted. Absence of
/// all three is non-fatal: dispatch proceeds without a status change.
pub const NOMBRES_ESTADO_DESPACHO: [&str; 3] = ["EN RUTA", "DESPACHADO", "Asignado"];

/// A status catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstadoNovedad {
    /// The canonical numeric identifier assigned by the database.
    pub estado_novedad_id: i64,
    /// Display name (e.g. "PENDIENTE", "EN RUTA").
    pub nombre: String,
    /// Display color (hex string).
    pub color: Option<String>,
    /// Display icon name.
    pub icono: Option<String>,
    /// Ordering rank for catalog listings.
    pub orden: i32,
    /// Whether this is the status assigned to every new incident.
    /// Exactly one active entry carries this flag.
    pub es_inicial: bool,
    /// Whether this status is terminal. Advisory only.
    pub es_final: bool,
    /// Whether reaching this status expects an assigned unit. Advisory only.
    pub requiere_unidad: bool,
    /// Active flag; inactive entries are invisible to lookups.
    pub activo: bool,
}

impl EstadoNovedad {
    /// Checks whether this entry matches one of the given display names.
    #[must_use]
    pub fn nombre_en(&self, nombres: &[&str]) -> bool {
        nombres.iter().any(|n| *n == self.nombre)
    }
}
