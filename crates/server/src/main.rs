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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use sereno_api::{
    ActualizarNovedadRequest, ApiEnvelope, ApiError, AsignarRecursosRequest, CrearNovedadRequest,
    EliminarNovedadResponse, EstadoNovedadInfo, actualizar_novedad, asignar_recursos,
    authenticate_actor, crear_novedad, eliminar_novedad, listar_estados, listar_novedades,
    obtener_historial, obtener_novedad,
};
use sereno_historial::Actor;
use sereno_persistence::{
    CambioEstadoData, NovedadDetalle, NuevoEstadoNovedad, Persistence, PersistenceError,
};

/// SERENO Server - HTTP server for the SERENO incident system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over --database.
    #[arg(long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Display timezone used for the turno classification
    #[arg(long, default_value = "America/Guayaquil")]
    timezone: String,

    /// Seed a demo catalog (statuses, types, a system user) when the
    /// status catalog is empty
    #[arg(long, default_value_t = false)]
    seed: bool,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the configured display timezone.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for incidents, catalog and history.
    persistence: Arc<Mutex<Persistence>>,
    /// The display timezone for turno computation.
    zona: Tz,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The API error rendered into the envelope body.
    error: ApiError,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ApiEnvelope<()>> = Json(ApiEnvelope::failure(&self.error));
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "Internal error");
        }
        Self { status, error: err }
    }
}

/// Extracts the authenticated actor from the gateway-injected header.
fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, HttpError> {
    let header: Option<&str> = headers
        .get("x-usuario-id")
        .and_then(|value| value.to_str().ok());
    authenticate_actor(header).map_err(HttpError::from)
}

/// Handler for POST `/novedades`.
///
/// Creates an incident.
async fn handle_crear_novedad(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(request): Json<CrearNovedadRequest>,
) -> Result<Json<ApiEnvelope<NovedadDetalle>>, HttpError> {
    let actor: Actor = actor_from_headers(&headers)?;
    let now: DateTime<Utc> = Utc::now();

    let mut persistence = app_state.persistence.lock().await;
    let detalle: NovedadDetalle =
        crear_novedad(&mut persistence, &request, actor, now, app_state.zona)?;
    drop(persistence);

    let message: String = format!("Novedad {} creada", detalle.novedad.novedad_code);
    Ok(Json(ApiEnvelope::ok(message, detalle)))
}

/// Handler for GET `/novedades`.
///
/// Lists active incidents, newest first.
async fn handle_listar_novedades(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ApiEnvelope<Vec<NovedadDetalle>>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let novedades: Vec<NovedadDetalle> = listar_novedades(&mut persistence)?;
    drop(persistence);

    Ok(Json(ApiEnvelope::ok("Listado de novedades", novedades)))
}

/// Handler for GET `/novedades/{id}`.
async fn handle_obtener_novedad(
    AxumState(app_state): AxumState<AppState>,
    Path(novedad_id): Path<i64>,
) -> Result<Json<ApiEnvelope<NovedadDetalle>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detalle: NovedadDetalle = obtener_novedad(&mut persistence, novedad_id)?;
    drop(persistence);

    Ok(Json(ApiEnvelope::ok("Novedad encontrada", detalle)))
}

/// Handler for PUT `/novedades/{id}`.
///
/// Applies a generic update.
async fn handle_actualizar_novedad(
    AxumState(app_state): AxumState<AppState>,
    Path(novedad_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<ActualizarNovedadRequest>,
) -> Result<Json<ApiEnvelope<NovedadDetalle>>, HttpError> {
    let actor: Actor = actor_from_headers(&headers)?;
    let now: DateTime<Utc> = Utc::now();

    let mut persistence = app_state.persistence.lock().await;
    let detalle: NovedadDetalle =
        actualizar_novedad(&mut persistence, novedad_id, &request, actor, now)?;
    drop(persistence);

    Ok(Json(ApiEnvelope::ok("Novedad actualizada", detalle)))
}

/// Handler for POST `/novedades/{id}/asignar`.
///
/// Assigns resources (dispatch).
async fn handle_asignar_recursos(
    AxumState(app_state): AxumState<AppState>,
    Path(novedad_id): Path<i64>,
    headers: HeaderMap,
    Json(request): Json<AsignarRecursosRequest>,
) -> Result<Json<ApiEnvelope<NovedadDetalle>>, HttpError> {
    let actor: Actor = actor_from_headers(&headers)?;
    let now: DateTime<Utc> = Utc::now();

    let mut persistence = app_state.persistence.lock().await;
    let detalle: NovedadDetalle =
        asignar_recursos(&mut persistence, novedad_id, &request, actor, now)?;
    drop(persistence);

    Ok(Json(ApiEnvelope::ok("Recursos asignados", detalle)))
}

/// Handler for DELETE `/novedades/{id}`.
///
/// Soft-deletes an incident.
async fn handle_eliminar_novedad(
    AxumState(app_state): AxumState<AppState>,
    Path(novedad_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ApiEnvelope<EliminarNovedadResponse>>, HttpError> {
    let actor: Actor = actor_from_headers(&headers)?;
    let now: DateTime<Utc> = Utc::now();

    let mut persistence = app_state.persistence.lock().await;
    let ack: EliminarNovedadResponse =
        eliminar_novedad(&mut persistence, novedad_id, actor, now)?;
    drop(persistence);

    Ok(Json(ApiEnvelope::ok("Novedad eliminada", ack)))
}

/// Handler for GET `/novedades/{id}/historial`.
///
/// Returns the status history, newest first; works for soft-deleted
/// incidents.
async fn handle_obtener_historial(
    AxumState(app_state): AxumState<AppState>,
    Path(novedad_id): Path<i64>,
) -> Result<Json<ApiEnvelope<Vec<CambioEstadoData>>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let historial: Vec<CambioEstadoData> = obtener_historial(&mut persistence, novedad_id)?;
    drop(persistence);

    Ok(Json(ApiEnvelope::ok("Historial de la novedad", historial)))
}

/// Handler for GET `/estados-novedad`.
///
/// Lists the status catalog.
async fn handle_listar_estados(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ApiEnvelope<Vec<EstadoNovedadInfo>>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let estados: Vec<EstadoNovedadInfo> = listar_estados(&mut persistence)?;
    drop(persistence);

    Ok(Json(ApiEnvelope::ok("Catálogo de estados", estados)))
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<ApiEnvelope<()>> {
    Json(ApiEnvelope::ok("ok", ()))
}

/// Seeds a demo catalog when the status catalog is empty.
///
/// Deployments normally seed through their own migrations; this exists
/// for local development and smoke testing.
fn seed_demo_catalog(persistence: &mut Persistence) -> Result<(), PersistenceError> {
    if !persistence.list_estados()?.is_empty() {
        info!("Status catalog already seeded; skipping demo seed");
        return Ok(());
    }

    info!("Seeding demo catalog");

    let estados: [(&str, &str, bool, bool, bool); 5] = [
        ("PENDIENTE", "#f39c12", true, false, false),
        ("EN RUTA", "#2980b9", false, false, true),
        ("EN ATENCIÓN", "#8e44ad", false, false, true),
        ("CERRADA", "#27ae60", false, true, false),
        ("DESCARTADA", "#7f8c8d", false, true, false),
    ];
    for (orden, (nombre, color, es_inicial, es_final, requiere_unidad)) in
        estados.into_iter().enumerate()
    {
        persistence.seed_estado(&NuevoEstadoNovedad {
            nombre: nombre.to_string(),
            color: Some(color.to_string()),
            icono: None,
            orden: i32::try_from(orden).unwrap_or(0) + 1,
            es_inicial,
            es_final,
            requiere_unidad,
        })?;
    }

    let tipo_seguridad: i64 = persistence.seed_tipo("SEGURIDAD CIUDADANA")?;
    persistence.seed_subtipo(tipo_seguridad, "RIÑA CALLEJERA", Some("ALTA"))?;
    persistence.seed_subtipo(tipo_seguridad, "RUIDO EXCESIVO", Some("BAJA"))?;
    let tipo_transito: i64 = persistence.seed_tipo("TRÁNSITO")?;
    persistence.seed_subtipo(tipo_transito, "ACCIDENTE DE TRÁNSITO", Some("ALTA"))?;

    persistence.seed_usuario("SISTEMA", "Usuario del Sistema")?;

    Ok(())
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/novedades", post(handle_crear_novedad))
        .route("/novedades", get(handle_listar_novedades))
        .route("/novedades/{novedad_id}", get(handle_obtener_novedad))
        .route("/novedades/{novedad_id}", put(handle_actualizar_novedad))
        .route("/novedades/{novedad_id}", delete(handle_eliminar_novedad))
        .route(
            "/novedades/{novedad_id}/asignar",
            post(handle_asignar_recursos),
        )
        .route(
            "/novedades/{novedad_id}/historial",
            get(handle_obtener_historial),
        )
        .route("/estados-novedad", get(handle_listar_estados))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing SERENO Server");

    let zona: Tz = args
        .timezone
        .parse()
        .map_err(|_| format!("Invalid timezone: '{}'", args.timezone))?;

    // Initialize persistence (MySQL, file-based or in-memory based on CLI)
    let mut persistence: Persistence = if let Some(mysql_url) = &args.mysql_url {
        info!("Using MySQL database");
        Persistence::new_with_mysql(mysql_url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.seed {
        seed_demo_catalog(&mut persistence)?;
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        zona,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode as HttpStatusCode};
    use tower::ServiceExt;

    fn create_test_app_state() -> AppState {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("in-memory database");
        seed_demo_catalog(&mut persistence).expect("seed demo catalog");
        // The gateway would normally guarantee these users exist.
        persistence
            .seed_usuario("OPERADOR1", "Operador Uno")
            .expect("seed usuario");
        persistence
            .seed_usuario("OPERADOR2", "Operador Dos")
            .expect("seed usuario");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            zona: chrono_tz::UTC,
        }
    }

    fn crear_request_body() -> String {
        serde_json::to_string(&serde_json::json!({
            "tipo_novedad_id": 1,
            "subtipo_novedad_id": 1,
            "fecha_ocurrencia": "2025-01-01T09:00:00Z",
            "ubicacion": "Av. Amazonas y Naciones Unidas",
            "descripcion": "Riña en vía pública",
            "reportante_nombre": "Juan Pérez"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_crear_novedad_requires_actor_header() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/novedades")
                    .header("content-type", "application/json")
                    .body(Body::from(crear_request_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["error"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_crear_y_consultar_novedad() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/novedades")
                    .header("content-type", "application/json")
                    .header("x-usuario-id", "2")
                    .body(Body::from(crear_request_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["data"]["novedad"]["novedad_code"], "000001");
        assert_eq!(envelope["data"]["estado_nombre"], "PENDIENTE");

        let novedad_id = envelope["data"]["novedad"]["novedad_id"].as_i64().unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/novedades/{novedad_id}/historial"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope["data"].as_array().unwrap().len(), 1);
        assert!(envelope["data"][0]["estado_anterior_id"].is_null());
    }

    #[tokio::test]
    async fn test_despacho_bloquea_a_otros_usuarios() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/novedades")
                    .header("content-type", "application/json")
                    .header("x-usuario-id", "2")
                    .body(Body::from(crear_request_body()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let novedad_id = envelope["data"]["novedad"]["novedad_id"].as_i64().unwrap();

        // User 2 dispatches.
        let asignacion = serde_json::json!({"vehiculo_id": 10}).to_string();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/novedades/{novedad_id}/asignar"))
                    .header("content-type", "application/json")
                    .header("x-usuario-id", "2")
                    .body(Body::from(asignacion))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        // User 3 is rejected.
        let patch = serde_json::json!({"descripcion": "intento ajeno"}).to_string();
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/novedades/{novedad_id}"))
                    .header("content-type", "application/json")
                    .header("x-usuario-id", "3")
                    .body(Body::from(patch))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(envelope["error"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_eliminar_novedad_dos_veces_es_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/novedades")
                    .header("content-type", "application/json")
                    .header("x-usuario-id", "2")
                    .body(Body::from(crear_request_body()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let novedad_id = envelope["data"]["novedad"]["novedad_id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/novedades/{novedad_id}"))
                    .header("x-usuario-id", "2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/novedades/{novedad_id}"))
                    .header("x-usuario-id", "2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listar_estados() {
        let app: Router = build_router(create_test_app_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/estados-novedad")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let estados = envelope["data"].as_array().unwrap();
        assert_eq!(estados.len(), 5);
        assert_eq!(estados[0]["nombre"], "PENDIENTE");
        assert_eq!(estados[0]["es_inicial"], true);
    }
}
