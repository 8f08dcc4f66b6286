//! HTTP error surface for non-metrics handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use memgauge_core::error::{ClientCode, MemgaugeError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] MemgaugeError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn client_code(&self) -> &'static str {
        match self {
            AppError::Core(e) => e.client_code().as_str(),
            AppError::Internal(_) => ClientCode::Internal.as_str(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Core(MemgaugeError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            AppError::Core(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({
            "error": self.client_code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
