//! noteboard-api - HTTP API server for noteboard

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use noteboard_api::{mapper, response::ApiResponse, services::NoteService};
use noteboard_core::{CreateNoteRequest, Error, Priority, UpdateNoteRequest};
use noteboard_db::{log_pool_metrics, Database, PoolConfig};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful
/// for log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APP STATE
// =============================================================================

#[derive(Clone)]
struct AppState {
    service: Arc<NoteService>,
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   RUST_LOG    - standard env filter (default: "noteboard_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "noteboard_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("noteboard-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false) // no ANSI in files
                        .with_writer(non_blocking),
                )
                .init();
        }
        Some(guard)
    } else if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
        None
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgres://localhost/noteboard".to_string());
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);
    let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .unwrap_or(10);

    // Connect to database
    info!("Connecting to database...");
    let db = Database::connect_with_config(
        &database_url,
        PoolConfig::default().max_connections(max_connections),
    )
    .await?;
    info!("Database connected");

    // Run pending database migrations on startup
    info!("Running database migrations...");
    db.migrate().await?;
    info!("Database migrations complete");

    log_pool_metrics(db.pool());

    let state = AppState {
        service: Arc::new(NoteService::new(Arc::new(db.notes.clone()))),
    };

    let app = Router::new()
        // Notes CRUD
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/:id",
            get(get_note).put(update_note).delete(delete_note),
        )
        // Search and filtering
        .route("/api/notes/search", get(search_notes))
        .route("/api/notes/filter", get(filter_notes))
        .route("/api/notes/category/:category", get(notes_by_category))
        .route("/api/notes/priority/:priority", get(notes_by_priority))
        // Aggregations
        .route("/api/notes/categories", get(list_categories))
        .route("/api/notes/recent", get(recent_notes))
        .route("/api/notes/stats", get(note_stats))
        // Health check
        .route("/api/notes/health", get(health_check))
        // The legacy UI is served from another origin, so CORS stays open.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// =============================================================================
// QUERY TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchQuery {
    keyword: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FilterQuery {
    keyword: Option<String>,
    category: Option<String>,
    priority: Option<String>,
}

// =============================================================================
// NOTE HANDLERS
// =============================================================================

async fn list_notes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let notes = state.service.list_all().await?;
    Ok(Json(ApiResponse::success(
        "Notes retrieved successfully",
        mapper::to_dtos(notes),
    )))
}

async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.service.get(id).await?;
    Ok(Json(ApiResponse::success(
        "Note found",
        mapper::to_dto(note),
    )))
}

async fn create_note(
    State(state): State<AppState>,
    Json(body): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.service.create(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Note created successfully",
            mapper::to_dto(note),
        )),
    ))
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.service.update(id, body).await?;
    Ok(Json(ApiResponse::success(
        "Note updated successfully",
        mapper::to_dto(note),
    )))
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.delete(id).await?;
    Ok(Json(ApiResponse::<serde_json::Value>::success_empty(
        "Note deleted successfully",
    )))
}

async fn search_notes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let keyword = query.keyword.unwrap_or_default();
    let notes = state.service.search(&keyword).await?;

    let message = if notes.is_empty() {
        format!("No notes found matching keyword: {}", keyword.trim())
    } else {
        format!("Found {} notes", notes.len())
    };
    Ok(Json(ApiResponse::success(message, mapper::to_dtos(notes))))
}

async fn filter_notes(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let priority = parse_priority_param(query.priority.as_deref())?;
    let notes = state
        .service
        .filter(query.keyword.as_deref(), query.category.as_deref(), priority)
        .await?;

    let message = if notes.is_empty() {
        "No notes matched the applied filters".to_string()
    } else {
        format!("Found {} notes", notes.len())
    };
    Ok(Json(ApiResponse::success(message, mapper::to_dtos(notes))))
}

async fn notes_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.service.by_category(&category).await?;

    let message = if notes.is_empty() {
        format!("No notes in category: {}", category.trim())
    } else {
        format!("Found {} notes in category: {}", notes.len(), category.trim())
    };
    Ok(Json(ApiResponse::success(message, mapper::to_dtos(notes))))
}

async fn notes_by_priority(
    State(state): State<AppState>,
    Path(priority): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let priority: Priority = priority.parse()?;
    let notes = state.service.by_priority(Some(priority)).await?;

    let message = if notes.is_empty() {
        format!("No notes with priority: {}", priority)
    } else {
        format!("Found {} notes with priority: {}", notes.len(), priority)
    };
    Ok(Json(ApiResponse::success(message, mapper::to_dtos(notes))))
}

async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.service.categories().await?;
    Ok(Json(ApiResponse::success(
        "Categories retrieved successfully",
        categories,
    )))
}

async fn recent_notes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let notes = state.service.recent().await?;
    Ok(Json(ApiResponse::success(
        "Recent notes retrieved",
        mapper::to_dtos(notes),
    )))
}

async fn note_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.service.stats().await?;
    Ok(Json(ApiResponse::success("Statistics retrieved", stats)))
}

/// Parse an optional priority query parameter, treating blank as absent.
fn parse_priority_param(value: Option<&str>) -> Result<Option<Priority>, ApiError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(Some(v.parse()?)),
        _ => Ok(None),
    }
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "UP",
        "service": "noteboard-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().timestamp_millis(),
    }))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    Internal(Error),
    NotFound(String),
    BadRequest(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::NoteNotFound(id) => ApiError::NotFound(format!("Note {} not found", id)),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                // Internal detail goes to the log, not the client.
                tracing::error!(
                    subsystem = "api",
                    error = %err,
                    "Request failed"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ApiResponse::<serde_json::Value>::error(message));
        (status, body).into_response()
    }
}
