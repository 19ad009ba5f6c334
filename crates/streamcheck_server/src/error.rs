use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use engine_logging::engine_error;
use serde_json::json;
use streamcheck_engine::VerifyError;

/// Everything a route can fail with. Rendered as `{"error": <message>}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing playlist")]
    MissingPlaylist,
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPlaylist | ApiError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Verify(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            engine_error!("Verification failed: {}", self);
        }
        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}
