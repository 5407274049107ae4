//! HTTP server for review queries and submissions.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | any path | List reviews ranked by sentiment |
//! | `POST` | any path | Create a review from form fields |
//! | other  | any path | `405 Method Not Allowed` (plain text), `HEAD` and `OPTIONS` included |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Query parameters (`GET`)
//!
//! `location`, `start_date`, `end_date`, all optional; dates are
//! `YYYY-MM-DD`. A repeated parameter uses its first non-empty value. The response is a JSON array of reviews, each with a nested
//! `sentiment` object, ordered by `sentiment.compound` descending.
//!
//! # Form fields (`POST`)
//!
//! `Location` and `ReviewBody`, `application/x-www-form-urlencoded`. A repeated
//! field uses its first non-empty value. A body that cannot be read as a form
//! is treated as an empty form.
//!
//! # Error Contract
//!
//! Validation failures return `400` with a flat JSON body:
//!
//! ```json
//! { "error": "Invalid location." }
//! ```

use axum::{
    body::Body,
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, Request, State,
    },
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ReviewError;
use crate::ingest::IngestService;
use crate::query::QueryService;
use crate::sentiment::SentimentScorer;
use crate::store::ReviewStore;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub query: QueryService,
    pub ingest: IngestService,
}

impl AppState {
    /// Wire both services to the same store.
    pub fn new(store: Arc<ReviewStore>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            query: QueryService::new(store.clone(), scorer),
            ingest: IngestService::new(store),
        }
    }
}

/// Build the application router.
///
/// Every path except `/health` serves the review API. Only `GET` and `POST`
/// reach the handlers; `HEAD` is not answered through `GET`.
pub fn build_router(state: AppState) -> Router {
    let reviews = get(handle_list).post(handle_create);

    Router::new()
        .route("/", reviews.clone())
        .route("/{*path}", reviews)
        .route_layer(middleware::from_fn(reject_other_methods))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the HTTP server.
///
/// Binds to `config.bind_addr()` and serves until the process is terminated.
///
/// # Returns
///
/// Returns `Ok(())` when the server shuts down, or an error if binding fails.
pub async fn run_server(
    config: &Config,
    store: Arc<ReviewStore>,
    scorer: Arc<dyn SentimentScorer>,
) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();
    info!(
        reviews = store.len(),
        scorer = scorer.name(),
        "starting review server"
    );

    let app = build_router(AppState::new(store, scorer));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on http://{}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Internal error type that converts into an Axum HTTP response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

/// Constructs a 400 error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

/// Constructs a 500 error.
fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}

/// Pretty-printed JSON with an explicit `Content-Length`.
fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, AppError> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| internal_error(format!("failed to encode response: {}", e)))?;
    let length = bytes.len();
    axum::http::Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, length)
        .body(Body::from(bytes))
        .map_err(|e| internal_error(format!("failed to build response: {}", e)))
}

/// Decoded `key=value` pairs, in request order.
type Fields = Vec<(String, String)>;

/// First non-empty value for `key`; empty values count as absent.
fn first_value<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.as_str())
}

// ============ GET ============

async fn handle_list(
    State(state): State<AppState>,
    query: Result<Query<Fields>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = query.map_err(|rejection| bad_request(rejection.body_text()))?;
    let results = state.query.list(
        first_value(&params, "location"),
        first_value(&params, "start_date"),
        first_value(&params, "end_date"),
    )?;
    json_response(StatusCode::OK, &results)
}

// ============ POST ============

async fn handle_create(
    State(state): State<AppState>,
    form: Result<Form<Fields>, FormRejection>,
) -> Result<Response, AppError> {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            debug!("unreadable form body, treating as empty: {}", rejection);
            Fields::new()
        }
    };
    let review = state.ingest.create(
        first_value(&fields, "Location"),
        first_value(&fields, "ReviewBody"),
    )?;
    json_response(StatusCode::CREATED, &review)
}

// ============ Other methods ============

async fn reject_other_methods(request: Request, next: Next) -> Response {
    match *request.method() {
        Method::GET | Method::POST => next.run(request).await,
        _ => handle_method_not_allowed().await,
    }
}

async fn handle_method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::CONTENT_TYPE, "text/plain")],
        "Method Not Allowed",
    )
        .into_response()
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

async fn handle_health() -> Result<Response, AppError> {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    json_response(StatusCode::OK, &health)
}
