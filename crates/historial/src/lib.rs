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

use chrono::{DateTime, Utc};

/// Represents the entity performing a mutation.
///
/// Every mutating operation carries the numeric id of an authenticated
/// user, injected by the upstream gateway after JWT and permission checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// The authenticated user's numeric identifier.
    pub usuario_id: i64,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `usuario_id` - The authenticated user's numeric identifier
    #[must_use]
    pub const fn new(usuario_id: i64) -> Self {
        Self { usuario_id }
    }
}

/// Caller-supplied overrides for a history entry.
///
/// The assignment endpoint accepts a `historial` payload whose sub-fields
/// take precedence over the server-computed values of the single history
/// entry written for the transition. Absent sub-fields fall back to the
/// computed values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistorialOverride {
    /// Previous-status override.
    pub estado_anterior_id: Option<i64>,
    /// Next-status override.
    pub estado_nuevo_id: Option<i64>,
    /// Elapsed-minutes override.
    pub tiempo_transcurrido_min: Option<i64>,
    /// Free-text notes.
    pub observaciones: Option<String>,
    /// Arbitrary metadata blob.
    pub metadata: Option<serde_json::Value>,
    /// Creator override.
    pub created_by: Option<i64>,
}

impl HistorialOverride {
    /// Returns true when no sub-field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.estado_anterior_id.is_none()
            && self.estado_nuevo_id.is_none()
            && self.tiempo_transcurrido_min.is_none()
            && self.observaciones.is_none()
            && self.metadata.is_none()
            && self.created_by.is_none()
    }
}

/// An immutable history entry recording one logical status transition.
///
/// Exactly one entry is appended per logical transition: one at creation
/// (with a null previous status) and one per subsequent status change.
/// Entries are never updated or deleted, and they survive the soft
/// deletion of their incident.
#[derive(Debug, Clone, PartialEq)]
pub struct CambioEstado {
    /// The status held before the transition. `None` only for the
    /// creation entry.
    pub estado_anterior_id: Option<i64>,
    /// The status held after the transition.
    pub estado_nuevo_id: i64,
    /// The user who performed the transition.
    pub usuario_id: i64,
    /// Whole minutes spent in the previous status.
    pub tiempo_transcurrido_min: Option<i64>,
    /// Free-text notes.
    pub observaciones: Option<String>,
    /// Arbitrary metadata blob.
    pub metadata: Option<serde_json::Value>,
    /// When the transition happened.
    pub fecha_cambio: DateTime<Utc>,
    /// Creator actor id.
    pub created_by: i64,
}

impl CambioEstado {
    /// Creates a new history entry from server-computed values.
    ///
    /// # Arguments
    ///
    /// * `estado_anterior_id` - The previous status, `None` at creation
    /// * `estado_nuevo_id` - The new status
    /// * `actor` - The user performing the transition
    /// * `tiempo_transcurrido_min` - Minutes spent in the previous status
    /// * `observaciones` - Free-text notes
    /// * `fecha_cambio` - The transition instant
    #[must_use]
    pub const fn new(
        estado_anterior_id: Option<i64>,
        estado_nuevo_id: i64,
        actor: Actor,
        tiempo_transcurrido_min: Option<i64>,
        observaciones: Option<String>,
        fecha_cambio: DateTime<Utc>,
    ) -> Self {
        Self {
            estado_anterior_id,
            estado_nuevo_id,
            usuario_id: actor.usuario_id,
            tiempo_transcurrido_min,
            observaciones,
            metadata: None,
            fecha_cambio,
            created_by: actor.usuario_id,
        }
    }

    /// Merges caller-supplied overrides over this entry's computed fields.
    ///
    /// Present override sub-fields win; absent ones leave the computed
    /// values in place. This keeps the transition engine the single writer
    /// while still letting the assignment endpoint enrich the entry.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &HistorialOverride) -> Self {
        if let Some(anterior) = overrides.estado_anterior_id {
            self.estado_anterior_id = Some(anterior);
        }
        if let Some(nuevo) = overrides.estado_nuevo_id {
            self.estado_nuevo_id = nuevo;
        }
        if let Some(tiempo) = overrides.tiempo_transcurrido_min {
            self.tiempo_transcurrido_min = Some(tiempo);
        }
        if let Some(observaciones) = &overrides.observaciones {
            self.observaciones = Some(observaciones.clone());
        }
        if let Some(metadata) = &overrides.metadata {
            self.metadata = Some(metadata.clone());
        }
        if let Some(created_by) = overrides.created_by {
            self.created_by = created_by;
        }
        self
    }
}
