//! Local HTTP interface for the browser extension.
//!
//! Provides [`router`] (the route table, also used by tests) and [`serve_http`],
//! which binds it to the configured address with permissive CORS.

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use focus_guard::config::SharedConfig;
use focus_guard::journal::service::{ConfigUpdate, JournalService};
use focus_guard::store::parse_date;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::api::{error_body, ok_body, ok_empty, today_note_body, ApiError, NoteBody};

type ApiResult = std::result::Result<Json<Value>, ApiError>;

/// Run a filesystem-bound service call off the async runtime.
async fn blocking<T, F>(f: F) -> std::result::Result<T, ApiError>
where
    F: FnOnce() -> focus_guard::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("worker task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Route table over a shared [`JournalService`].
pub fn router(service: JournalService) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/streak", get(streak))
        .route("/note", get(today_note).post(save_today_note))
        .route("/note/{date}", get(note_for_date).post(save_note_for_date))
        .route("/config", get(get_config).post(update_config))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(service)
}

async fn ping() -> Json<Value> {
    Json(ok_empty())
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(error_body("not found")))
}

// GET /streak
async fn streak(State(service): State<JournalService>) -> ApiResult {
    let report = blocking(move || service.streak_report(service.today())).await?;
    Ok(Json(ok_body(&report)))
}

// GET /note
async fn today_note(State(service): State<JournalService>) -> ApiResult {
    let note = blocking(move || service.get_or_create_today_note(service.today())).await?;
    Ok(Json(today_note_body(&note)))
}

// POST /note
async fn save_today_note(
    State(service): State<JournalService>,
    Json(body): Json<NoteBody>,
) -> ApiResult {
    blocking(move || service.save_note(service.today(), &body.content)).await?;
    Ok(Json(ok_empty()))
}

// GET /note/{date}
async fn note_for_date(
    State(service): State<JournalService>,
    Path(date): Path<String>,
) -> ApiResult {
    let date = parse_date(&date)?;
    match blocking(move || service.read_note(date)).await? {
        Some(content) => Ok(Json(json!({ "ok": true, "content": content }))),
        None => Err(ApiError::NotFound("note not found".into())),
    }
}

// POST /note/{date}
async fn save_note_for_date(
    State(service): State<JournalService>,
    Path(date): Path<String>,
    Json(body): Json<NoteBody>,
) -> ApiResult {
    let date = parse_date(&date)?;
    blocking(move || service.save_note(date, &body.content)).await?;
    Ok(Json(ok_empty()))
}

// GET /config
async fn get_config(State(service): State<JournalService>) -> Json<Value> {
    Json(ok_body(&service.config_view()))
}

// POST /config
async fn update_config(
    State(service): State<JournalService>,
    Json(update): Json<ConfigUpdate>,
) -> ApiResult {
    let view = blocking(move || service.update_config(update))
        .await
        .map_err(|e| match e {
            ApiError::Journal(focus_guard::error::JournalError::Configuration(msg)) => {
                ApiError::BadRequest(msg)
            }
            other => other,
        })?;
    Ok(Json(ok_body(&view)))
}

/// Serve the HTTP interface until Ctrl-C.
pub async fn serve_http(config: SharedConfig) -> Result<()> {
    let snapshot = config.snapshot();
    let bind_addr = format!("{}:{}", snapshot.server.host, snapshot.server.port);

    match snapshot.notes_root() {
        Some(root) => tracing::info!(notes = %root.display(), "vault configured"),
        None => tracing::warn!("no vault configured; POST /config to set one"),
    }

    let service = JournalService::with_system_clock(config);
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Focus Guard server listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
            }
            tracing::info!("shutting down HTTP server");
        })
        .await?;

    Ok(())
}
