//! JSON shapes shared by the HTTP server and the native-messaging host.
//!
//! Every reply carries `ok`; success bodies are the payload's fields with
//! `ok: true` merged in, failures are `{ok: false, error}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use focus_guard::error::JournalError;
use focus_guard::journal::service::TodayNote;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of note save requests.
#[derive(Debug, Deserialize)]
pub struct NoteBody {
    #[serde(default)]
    pub content: String,
}

/// `{ok: true}` merged into the serialized fields of `payload`.
pub fn ok_body<T: Serialize>(payload: &T) -> Value {
    match serde_json::to_value(payload) {
        Ok(Value::Object(mut map)) => {
            map.insert("ok".into(), Value::Bool(true));
            Value::Object(map)
        }
        Ok(other) => json!({ "ok": true, "data": other }),
        Err(e) => error_body(&format!("serialization failed: {e}")),
    }
}

pub fn ok_empty() -> Value {
    json!({ "ok": true })
}

pub fn error_body(message: &str) -> Value {
    json!({ "ok": false, "error": message })
}

/// `carriedTasks` is only reported for a freshly created note.
pub fn today_note_body(note: &TodayNote) -> Value {
    let mut body = ok_body(note);
    if !note.created {
        if let Value::Object(map) = &mut body {
            map.remove("carriedTasks");
        }
    }
    body
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    Journal(JournalError),
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<JournalError> for ApiError {
    fn from(e: JournalError) -> Self {
        Self::Journal(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Journal(JournalError::Configuration(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Journal(JournalError::InvalidDate(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Journal(JournalError::Io { .. } | JournalError::ConfigFormat(_))
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Journal(e) => e.to_string(),
            Self::BadRequest(m) | Self::NotFound(m) | Self::Internal(m) => m.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "request failed");
        } else {
            tracing::debug!(status = %status, error = %message, "request rejected");
        }
        (status, Json(error_body(&message))).into_response()
    }
}
