use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;
use crate::voice::VoiceResult;

pub const HOME_MESSAGE: &str = "✅ AI Dev System Backend Running!";

#[derive(Debug, Serialize)]
pub struct StatusPayload {
    pub status: &'static str,
    pub uptime: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ApiStatusPayload {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DebugResponse {
    pub debug_suggestions: String,
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/status", get(status))
        .route("/api/status", get(api_status))
        .route("/debug", post(debug_code))
        .route("/voice-command", get(voice_command))
}

async fn home() -> &'static str {
    HOME_MESSAGE
}

async fn status() -> Json<StatusPayload> {
    Json(StatusPayload {
        status: "running",
        uptime: "100%",
    })
}

async fn api_status() -> Json<ApiStatusPayload> {
    Json(ApiStatusPayload {
        status: "API is working",
    })
}

async fn debug_code(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DebugResponse>, AppError> {
    let code = code_from_body(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    info!(
        "Debug request ({} bytes of code)",
        code.as_deref().map_or(0, str::len)
    );

    let suggestions = state
        .debug_relay
        .suggest(code.as_deref())
        .await
        .map_err(|e| {
            error!("AI Debugging Failed: {}", e);
            AppError::UpstreamCompletion
        })?;

    Ok(Json(DebugResponse {
        debug_suggestions: suggestions,
    }))
}

async fn voice_command(State(state): State<AppState>) -> Result<Json<VoiceResult>, AppError> {
    let result = state.voice_listener.listen_for_command().await.map_err(|e| {
        error!("Voice command failed: {}", e);
        AppError::from(e)
    })?;
    Ok(Json(result))
}

/// Pull `code` out of a `/debug` body without validating its type.
///
/// Only bytes that are not JSON are rejected. An empty body, a non-object
/// document, or a missing/null field all mean no code; non-string values are
/// passed along as their JSON text.
pub fn code_from_body(body: &[u8]) -> Result<Option<String>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body)?;
    Ok(match value.get("code") {
        None | Some(Value::Null) => None,
        Some(Value::String(code)) => Some(code.clone()),
        Some(other) => Some(other.to_string()),
    })
}
