// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{TimeZone, Utc};
use sereno_domain::{DomainError, Prioridad, Turno};

use crate::tests::helpers::{
    ESTADO_PENDIENTE, create_estado_inicial, create_test_actor, create_test_now,
    create_valid_input,
};
use crate::{CoreError, CreateNovedad, CreatePlan, plan_create, resolve_estado_inicial};

#[test]
fn test_create_assigns_first_code_on_empty_table() {
    let plan: CreatePlan = plan_create(
        &create_valid_input(),
        Some(Prioridad::Alta),
        &create_estado_inicial(),
        None,
        create_test_actor(),
        create_test_now(),
        chrono_tz::UTC,
    )
    .unwrap();

    assert_eq!(plan.code.value(), "000001");
}

#[test]
fn test_create_advances_existing_code() {
    let plan: CreatePlan = plan_create(
        &create_valid_input(),
        None,
        &create_estado_inicial(),
        Some("000041"),
        create_test_actor(),
        create_test_now(),
        chrono_tz::UTC,
    )
    .unwrap();

    assert_eq!(plan.code.value(), "000042");
}

#[test]
fn test_create_takes_subtype_priority_with_media_fallback() {
    let with_default: CreatePlan = plan_create(
        &create_valid_input(),
        Some(Prioridad::Alta),
        &create_estado_inicial(),
        None,
        create_test_actor(),
        create_test_now(),
        chrono_tz::UTC,
    )
    .unwrap();
    assert_eq!(with_default.prioridad, Prioridad::Alta);

    let without_default: CreatePlan = plan_create(
        &create_valid_input(),
        None,
        &create_estado_inicial(),
        None,
        create_test_actor(),
        create_test_now(),
        chrono_tz::UTC,
    )
    .unwrap();
    assert_eq!(without_default.prioridad, Prioridad::Media);
}

#[test]
fn test_create_computes_turno_from_occurrence_hour() {
    let mut input: CreateNovedad = create_valid_input();
    input.fecha_ocurrencia = Some(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());

    let plan: CreatePlan = plan_create(
        &input,
        None,
        &create_estado_inicial(),
        None,
        create_test_actor(),
        create_test_now(),
        chrono_tz::UTC,
    )
    .unwrap();

    assert_eq!(plan.turno, Turno::Manana);
}

#[test]
fn test_create_defaults_occurrence_to_now() {
    let mut input: CreateNovedad = create_valid_input();
    input.fecha_ocurrencia = None;

    let now = create_test_now();
    let plan: CreatePlan = plan_create(
        &input,
        None,
        &create_estado_inicial(),
        None,
        create_test_actor(),
        now,
        chrono_tz::UTC,
    )
    .unwrap();

    assert_eq!(plan.fecha_ocurrencia, now);
    assert_eq!(plan.fecha_reporte, now);
    // 14:30 UTC falls in the afternoon shift.
    assert_eq!(plan.turno, Turno::Tarde);
}

#[test]
fn test_create_history_entry_has_null_previous_and_initial_next() {
    let plan: CreatePlan = plan_create(
        &create_valid_input(),
        None,
        &create_estado_inicial(),
        None,
        create_test_actor(),
        create_test_now(),
        chrono_tz::UTC,
    )
    .unwrap();

    assert_eq!(plan.historial.estado_anterior_id, None);
    assert_eq!(plan.historial.estado_nuevo_id, ESTADO_PENDIENTE);
    assert_eq!(plan.historial.usuario_id, create_test_actor().usuario_id);
    assert_eq!(plan.estado_novedad_id, ESTADO_PENDIENTE);
}

#[test]
fn test_create_rejects_nonpositive_classification_ids() {
    let mut input: CreateNovedad = create_valid_input();
    input.subtipo_novedad_id = 0;

    let result = plan_create(
        &input,
        None,
        &create_estado_inicial(),
        None,
        create_test_actor(),
        create_test_now(),
        chrono_tz::UTC,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidReferencia { .. }
        ))
    ));
}

#[test]
fn test_create_rejects_anonymous_report_with_contact_data() {
    let mut input: CreateNovedad = create_valid_input();
    input.es_anonimo = true;

    let result = plan_create(
        &input,
        None,
        &create_estado_inicial(),
        None,
        create_test_actor(),
        create_test_now(),
        chrono_tz::UTC,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidReportante(_)
        ))
    ));
}

#[test]
fn test_missing_initial_status_is_fatal() {
    let result = resolve_estado_inicial(None);
    assert_eq!(result, Err(DomainError::NoEstadoInicial));

    let mut inactivo = create_estado_inicial();
    inactivo.activo = false;
    assert_eq!(
        resolve_estado_inicial(Some(inactivo)),
        Err(DomainError::NoEstadoInicial)
    );
}
