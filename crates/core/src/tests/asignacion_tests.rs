// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{Duration, TimeZone, Utc};
use sereno_domain::DomainError;
use sereno_historial::{CambioEstado, HistorialOverride};

use crate::tests::helpers::{
    ESTADO_EN_RUTA, ESTADO_PENDIENTE, create_dispatched_image, create_fresh_image,
    create_other_actor, create_test_actor, create_test_now,
};
use crate::{AsignacionRecursos, CoreError, NovedadImage, TransitionPlan, plan_asignacion};

#[test]
fn test_first_dispatch_records_owner_and_timestamp() {
    let image: NovedadImage = create_fresh_image();
    let asignacion: AsignacionRecursos = AsignacionRecursos {
        vehiculo_id: Some(10),
        ..AsignacionRecursos::default()
    };
    let now = create_test_now();

    let plan: TransitionPlan =
        plan_asignacion(&image, &asignacion, Some(ESTADO_EN_RUTA), create_test_actor(), now)
            .unwrap();

    assert_eq!(
        plan.cambios.usuario_despacho,
        Some(create_test_actor().usuario_id)
    );
    assert_eq!(plan.cambios.fecha_despacho, Some(now));
    assert_eq!(plan.cambios.vehiculo_id, Some(10));
}

#[test]
fn test_redispatch_keeps_owner_but_refreshes_timestamp() {
    let image: NovedadImage = create_dispatched_image();
    let asignacion: AsignacionRecursos = AsignacionRecursos::default();
    let now = create_test_now();

    let plan: TransitionPlan =
        plan_asignacion(&image, &asignacion, None, create_test_actor(), now).unwrap();

    // Owner column untouched on re-dispatch; timestamp always written.
    assert_eq!(plan.cambios.usuario_despacho, None);
    assert_eq!(plan.cambios.fecha_despacho, Some(now));
}

#[test]
fn test_dispatch_by_other_user_is_rejected() {
    let image: NovedadImage = create_dispatched_image();
    let asignacion: AsignacionRecursos = AsignacionRecursos::default();

    let result = plan_asignacion(
        &image,
        &asignacion,
        None,
        create_other_actor(),
        create_test_now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::DispatchOwnership { .. }
        ))
    ));
}

#[test]
fn test_caller_supplied_dispatch_timestamp_wins() {
    let image: NovedadImage = create_fresh_image();
    let despacho = Utc.with_ymd_and_hms(2025, 1, 1, 9, 45, 0).unwrap();
    let asignacion: AsignacionRecursos = AsignacionRecursos {
        fecha_despacho: Some(despacho),
        ..AsignacionRecursos::default()
    };

    let plan: TransitionPlan =
        plan_asignacion(&image, &asignacion, None, create_test_actor(), create_test_now())
            .unwrap();

    assert_eq!(plan.cambios.fecha_despacho, Some(despacho));
}

#[test]
fn test_falsy_fields_leave_columns_untouched() {
    let image: NovedadImage = create_fresh_image();
    let asignacion: AsignacionRecursos = AsignacionRecursos {
        unidad_oficina_id: Some(0),
        km_inicial: Some(0.0),
        observaciones: Some(String::new()),
        requiere_seguimiento: Some(false),
        vehiculo_id: Some(5),
        ..AsignacionRecursos::default()
    };

    let plan: TransitionPlan =
        plan_asignacion(&image, &asignacion, None, create_test_actor(), create_test_now())
            .unwrap();

    // The zero-ish values are treated as "not provided", not "set to null".
    assert_eq!(plan.cambios.unidad_oficina_id, None);
    assert_eq!(plan.cambios.km_inicial, None);
    assert_eq!(plan.cambios.observaciones, None);
    assert_eq!(plan.cambios.requiere_seguimiento, None);
    assert_eq!(plan.cambios.vehiculo_id, Some(5));
}

#[test]
fn test_status_change_writes_single_generic_entry_without_payload() {
    let image: NovedadImage = create_fresh_image();
    let asignacion: AsignacionRecursos = AsignacionRecursos::default();
    let now = create_test_now();

    let plan: TransitionPlan =
        plan_asignacion(&image, &asignacion, Some(ESTADO_EN_RUTA), create_test_actor(), now)
            .unwrap();

    let entry: CambioEstado = plan.historial.expect("status change must be recorded");
    assert_eq!(entry.estado_anterior_id, Some(ESTADO_PENDIENTE));
    assert_eq!(entry.estado_nuevo_id, ESTADO_EN_RUTA);
    assert_eq!(entry.observaciones.as_deref(), Some("Novedad despachada"));
}

#[test]
fn test_historial_payload_overrides_computed_entry_fields() {
    let image: NovedadImage = create_fresh_image();
    let asignacion: AsignacionRecursos = AsignacionRecursos {
        historial: Some(HistorialOverride {
            observaciones: Some(String::from("unidad 12 en camino")),
            tiempo_transcurrido_min: Some(3),
            metadata: Some(serde_json::json!({"radio": "canal 4"})),
            ..HistorialOverride::default()
        }),
        ..AsignacionRecursos::default()
    };

    let plan: TransitionPlan = plan_asignacion(
        &image,
        &asignacion,
        Some(ESTADO_EN_RUTA),
        create_test_actor(),
        create_test_now(),
    )
    .unwrap();

    let entry: CambioEstado = plan.historial.expect("status change must be recorded");
    assert_eq!(entry.observaciones.as_deref(), Some("unidad 12 en camino"));
    assert_eq!(entry.tiempo_transcurrido_min, Some(3));
    // Computed fields survive where the payload is silent.
    assert_eq!(entry.estado_anterior_id, Some(ESTADO_PENDIENTE));
    assert_eq!(entry.estado_nuevo_id, ESTADO_EN_RUTA);
}

#[test]
fn test_unchanged_status_writes_no_entry_even_with_payload() {
    let image: NovedadImage = create_fresh_image();
    let asignacion: AsignacionRecursos = AsignacionRecursos {
        historial: Some(HistorialOverride {
            observaciones: Some(String::from("sin transición")),
            ..HistorialOverride::default()
        }),
        ..AsignacionRecursos::default()
    };

    let plan: TransitionPlan = plan_asignacion(
        &image,
        &asignacion,
        Some(ESTADO_PENDIENTE),
        create_test_actor(),
        create_test_now(),
    )
    .unwrap();

    assert!(plan.historial.is_none());
}

#[test]
fn test_unresolved_status_leaves_status_unchanged() {
    let image: NovedadImage = create_fresh_image();
    let asignacion: AsignacionRecursos = AsignacionRecursos {
        vehiculo_id: Some(10),
        ..AsignacionRecursos::default()
    };

    let plan: TransitionPlan =
        plan_asignacion(&image, &asignacion, None, create_test_actor(), create_test_now())
            .unwrap();

    assert_eq!(plan.cambios.estado_novedad_id, None);
    assert!(plan.historial.is_none());
}

#[test]
fn test_assignment_arrival_derives_response_time_once() {
    let image: NovedadImage = create_fresh_image();
    let llegada = image.fecha_ocurrencia + Duration::minutes(21);
    let asignacion: AsignacionRecursos = AsignacionRecursos {
        fecha_llegada: Some(llegada),
        ..AsignacionRecursos::default()
    };

    let plan: TransitionPlan =
        plan_asignacion(&image, &asignacion, None, create_test_actor(), create_test_now())
            .unwrap();

    assert_eq!(plan.cambios.tiempo_respuesta_min, Some(21));
}
