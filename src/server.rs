//! JSON HTTP boundary for the indice service.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/indices` | List indices, optionally filtered |
//! | `GET`  | `/indices/random` | One randomly sampled indice |
//! | `POST` | `/indices` | Insert an indice |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! `GET /indices` accepts the optional query parameters `country`, `region`,
//! `category`, and `query`; each matches case-insensitively as a substring
//! and `query` runs against the content and keywords. Indices are encoded as
//! `{country, region, category, content, keywords}`.
//!
//! # Error Contract
//!
//! Error responses carry a machine-readable code and a message:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "no indices in the store" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//! An empty store on `/indices/random` maps to `not_found`; a rejected
//! `POST /indices` body maps to `bad_request`; storage failures map to
//! `internal`.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser-based
//! clients.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::db;
use crate::error::Error;
use crate::models::{GeoIndice, IndiceFilter};
use crate::schema;
use crate::seed;
use crate::service::QueryService;

/// Shared application state passed to all route handlers via Axum's `State`
/// extractor.
#[derive(Clone)]
struct AppState {
    service: QueryService,
}

/// Starts the HTTP server.
///
/// Runs the full startup sequence in order: connect the pool, create the
/// schema (fatal on failure), seed the sample corpus if the store is empty,
/// then bind and serve until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let pool = db::connect(config).await?;
    schema::ensure_schema(&pool).await?;

    let seeded = seed::seed_if_empty(&pool, &seed::initial_corpus()).await?;
    if seeded > 0 {
        tracing::info!(records = seeded, "seeded empty store");
    }

    let state = AppState {
        service: QueryService::new(pool),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/indices", get(handle_list).post(handle_add))
        .route("/indices/random", get(handle_random))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    tracing::info!("indice server listening on http://{}", config.server.bind);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 404 Not Found error.
fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 Internal Server Error.
fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

/// Maps core errors onto HTTP responses: rejected input is the client's
/// fault, everything else is ours.
fn classify(err: Error) -> AppError {
    match err {
        Error::Validation(message) => bad_request(message),
        other => internal(other.to_string()),
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /indices ============

/// Handler for `GET /indices`.
///
/// Without query parameters, returns every indice in insertion order. With
/// parameters, returns the AND-composed filtered subset. An empty result is
/// a valid `200` with an empty array.
async fn handle_list(
    State(state): State<AppState>,
    Query(filter): Query<IndiceFilter>,
) -> Result<Json<Vec<GeoIndice>>, AppError> {
    let indices = if filter.is_empty() {
        state.service.list_all().await
    } else {
        state.service.list_filtered(filter).await
    }
    .map_err(classify)?;

    Ok(Json(indices))
}

// ============ GET /indices/random ============

/// Handler for `GET /indices/random`.
///
/// Returns one uniformly sampled indice, or `404` when the store is empty.
async fn handle_random(State(state): State<AppState>) -> Result<Json<GeoIndice>, AppError> {
    match state.service.get_random_one().await.map_err(classify)? {
        Some(indice) => Ok(Json(indice)),
        None => Err(not_found("no indices in the store")),
    }
}

// ============ POST /indices ============

/// JSON response body for `POST /indices`.
#[derive(Serialize)]
struct AddResponse {
    id: i64,
}

/// Handler for `POST /indices`.
///
/// Inserts the indice and its keywords atomically and returns `201` with the
/// generated id. A missing scalar field is rejected with `400` before any
/// write; a malformed body never reaches the handler (Axum rejects it).
async fn handle_add(
    State(state): State<AppState>,
    Json(indice): Json<GeoIndice>,
) -> Result<(StatusCode, Json<AddResponse>), AppError> {
    let id = state.service.add_one(&indice).await.map_err(classify)?;
    Ok((StatusCode::CREATED, Json(AddResponse { id })))
}
