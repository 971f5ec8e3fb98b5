// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::Duration;
use sereno_domain::DomainError;
use sereno_historial::CambioEstado;

use crate::tests::helpers::{
    ESTADO_EN_RUTA, ESTADO_PENDIENTE, create_dispatched_image, create_fresh_image,
    create_other_actor, create_test_actor, create_test_now,
};
use crate::{CoreError, NovedadImage, NovedadPatch, TransitionPlan, plan_update};

#[test]
fn test_update_by_dispatcher_succeeds() {
    let image: NovedadImage = create_dispatched_image();
    let patch: NovedadPatch = NovedadPatch {
        descripcion: Some(String::from("actualizada")),
        ..NovedadPatch::default()
    };

    let result = plan_update(&image, &patch, create_test_actor(), create_test_now());
    assert!(result.is_ok());
}

#[test]
fn test_update_by_other_user_is_rejected_after_dispatch() {
    let image: NovedadImage = create_dispatched_image();
    let patch: NovedadPatch = NovedadPatch {
        descripcion: Some(String::from("intrusa")),
        ..NovedadPatch::default()
    };

    let result = plan_update(&image, &patch, create_other_actor(), create_test_now());

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::DispatchOwnership { .. }
        ))
    ));
}

#[test]
fn test_update_before_dispatch_is_open_to_any_actor() {
    let image: NovedadImage = create_fresh_image();
    let patch: NovedadPatch = NovedadPatch::default();

    assert!(plan_update(&image, &patch, create_other_actor(), create_test_now()).is_ok());
}

#[test]
fn test_status_change_appends_one_history_entry() {
    let image: NovedadImage = create_fresh_image();
    let patch: NovedadPatch = NovedadPatch {
        estado_novedad_id: Some(ESTADO_EN_RUTA),
        ..NovedadPatch::default()
    };
    let now = create_test_now();

    let plan: TransitionPlan =
        plan_update(&image, &patch, create_test_actor(), now).unwrap();

    let entry: CambioEstado = plan.historial.expect("status change must be recorded");
    assert_eq!(entry.estado_anterior_id, Some(ESTADO_PENDIENTE));
    assert_eq!(entry.estado_nuevo_id, ESTADO_EN_RUTA);
    assert_eq!(entry.observaciones, None);
    // Elapsed time measured from the previous updated_at (09:05 -> 14:30).
    assert_eq!(entry.tiempo_transcurrido_min, Some(325));
}

#[test]
fn test_unchanged_status_appends_nothing() {
    let image: NovedadImage = create_fresh_image();
    let patch: NovedadPatch = NovedadPatch {
        estado_novedad_id: Some(ESTADO_PENDIENTE),
        descripcion: Some(String::from("solo texto")),
        ..NovedadPatch::default()
    };

    let plan: TransitionPlan =
        plan_update(&image, &patch, create_test_actor(), create_test_now()).unwrap();

    assert!(plan.historial.is_none());
}

#[test]
fn test_absent_status_appends_nothing() {
    let image: NovedadImage = create_fresh_image();
    let patch: NovedadPatch = NovedadPatch {
        descripcion: Some(String::from("sin cambio de estado")),
        ..NovedadPatch::default()
    };

    let plan: TransitionPlan =
        plan_update(&image, &patch, create_test_actor(), create_test_now()).unwrap();

    assert!(plan.historial.is_none());
}

#[test]
fn test_first_arrival_derives_response_time() {
    let image: NovedadImage = create_fresh_image();
    let llegada = image.fecha_ocurrencia + Duration::minutes(37);
    let patch: NovedadPatch = NovedadPatch {
        fecha_llegada: Some(llegada),
        ..NovedadPatch::default()
    };

    let plan: TransitionPlan =
        plan_update(&image, &patch, create_test_actor(), create_test_now()).unwrap();

    assert_eq!(plan.cambios.tiempo_respuesta_min, Some(37));
    assert_eq!(plan.cambios.fecha_llegada, Some(llegada));
}

#[test]
fn test_second_arrival_does_not_recompute_response_time() {
    let mut image: NovedadImage = create_fresh_image();
    image.fecha_llegada = Some(image.fecha_ocurrencia + Duration::minutes(37));
    image.tiempo_respuesta_min = Some(37);

    let patch: NovedadPatch = NovedadPatch {
        fecha_llegada: Some(image.fecha_ocurrencia + Duration::minutes(90)),
        ..NovedadPatch::default()
    };

    let plan: TransitionPlan =
        plan_update(&image, &patch, create_test_actor(), create_test_now()).unwrap();

    // The corrected arrival is stored but the derived value stays frozen.
    assert_eq!(plan.cambios.tiempo_respuesta_min, None);
    assert!(plan.cambios.fecha_llegada.is_some());
}

#[test]
fn test_absent_patch_fields_touch_nothing() {
    let image: NovedadImage = create_fresh_image();
    let plan: TransitionPlan =
        plan_update(&image, &NovedadPatch::default(), create_test_actor(), create_test_now())
            .unwrap();

    assert_eq!(plan.cambios.estado_novedad_id, None);
    assert_eq!(plan.cambios.descripcion, None);
    assert_eq!(plan.cambios.fecha_llegada, None);
    assert_eq!(plan.cambios.tiempo_respuesta_min, None);
    assert!(plan.historial.is_none());
}
