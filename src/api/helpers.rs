//! Response builders shared by the HTTP handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::errors::DigestError;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub detail: String,
}

/// Status code an error is reported with.
#[must_use]
pub fn status_for(error: &DigestError) -> StatusCode {
    if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Build an error response with the given status code and message.
#[must_use]
pub fn err_response(status: StatusCode, kind: &str, detail: &str) -> Response {
    let body = ErrorBody {
        error: kind.to_string(),
        detail: detail.to_string(),
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for DigestError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_client_error() {
            warn!(kind = self.kind(), "Rejected request: {}", self);
        } else {
            error!(kind = self.kind(), "Request failed: {}", self);
        }
        err_response(status, self.kind(), &self.to_string())
    }
}
