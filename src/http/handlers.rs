//! HTTP error mapping and the small fixed endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use media_share_lib::MediaError;

/// HTTP error type
#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    UnsupportedMediaType(String),
    Unprocessable(String),
    InternalError(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            HttpError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            HttpError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, body).into_response()
    }
}

impl From<MediaError> for HttpError {
    fn from(err: MediaError) -> Self {
        let msg = err.to_string();
        match err {
            MediaError::InvalidPath(_) => HttpError::BadRequest(msg),
            MediaError::NotFound(_) | MediaError::WrongType { .. } => HttpError::NotFound(msg),
            MediaError::UnknownSubtitleType { .. } => HttpError::UnsupportedMediaType(msg),
            MediaError::NoContent { .. } => HttpError::Unprocessable(msg),
            MediaError::Io(_) => {
                tracing::error!("{}", msg);
                HttpError::InternalError(msg)
            }
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "online",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
