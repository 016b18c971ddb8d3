//! Error types for the external integrations and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned to clients when the completion service fails
pub const DEBUG_FAILURE_MESSAGE: &str = "AI debugging encountered an issue.";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion response had no text")]
    EmptyResponse,
}

/// Failures reported by a speech-recognition service
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// The service processed the audio but found no intelligible speech
    #[error("speech was unintelligible")]
    UnknownValue,

    /// The service could not be reached or answered with an error
    #[error("speech recognition request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for RecognitionError {
    fn from(err: reqwest::Error) -> Self {
        RecognitionError::Request(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("no audio input device available")]
    AudioUnavailable,

    #[error("microphone is busy with another recording")]
    Busy,

    #[error("audio capture failed: {0}")]
    Capture(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", DEBUG_FAILURE_MESSAGE)]
    UpstreamCompletion,

    #[error("No audio input device available")]
    AudioUnavailable,

    #[error("Microphone is busy with another recording")]
    RecordingInProgress,

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamCompletion => StatusCode::BAD_GATEWAY,
            AppError::AudioUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RecordingInProgress => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<VoiceError> for AppError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::AudioUnavailable => AppError::AudioUnavailable,
            VoiceError::Busy => AppError::RecordingInProgress,
            VoiceError::Capture(msg) => {
                AppError::Internal(format!("Audio capture failed: {}", msg))
            }
        }
    }
}
