//! HTTP error mapping for the sandbox API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// JSON body of every non-2xx response: `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors returned by the sandbox endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Anything other than `POST`. Carries `Allow: POST`.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Unparseable body, or a seed/query failure. The message is passed through unchanged.
    #[error("{0}")]
    BadRequest(String),

    /// The blocking sandbox task could not be joined.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorBody {
            error: self.to_string(),
        });

        match self {
            Self::MethodNotAllowed => (status, [(header::ALLOW, "POST")], body).into_response(),
            Self::BadRequest(_) | Self::Internal(_) => (status, body).into_response(),
        }
    }
}
