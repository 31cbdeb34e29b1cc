//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure on the download path is a server error; the body is always
//! `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use zgs_indexer_client::IndexerError;

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The indexer could not materialize the file.
    #[error("Download error: {0}")]
    Download(#[from] IndexerError),

    /// The scratch file could not be opened for sending.
    #[error("Failed to send file")]
    SendFile(#[source] std::io::Error),

    /// Any other handler failure.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Download(_) | Self::SendFile(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::SendFile(source) => tracing::error!(error = %source, "send file error"),
            other => tracing::error!(error = %other, "download error"),
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
