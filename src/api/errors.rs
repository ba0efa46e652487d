use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    status: u16,     // HTTP status code
    error: String,   // Short error identifier
    message: String, // Human-readable error message
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: &str, message: &str) -> Self {
        ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
            message: message.to_string(),
        }
    }

    pub fn session(e: tower_sessions::session::Error) -> Self {
        error!("Session store failure: {}", e);
        ErrorResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "session_error",
            "Unable to load the calculator session.",
        )
    }

    pub fn upload(e: axum::extract::multipart::MultipartError) -> Self {
        ErrorResponse::new(e.status(), "upload_error", &e.body_text())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
