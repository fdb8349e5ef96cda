//! Errors surfaced at the HTTP boundary.
//!
//! Infrastructure failures (DNS, cache backend, blocklist fetch) never reach
//! this type: they degrade inside the validation pipeline. Only client input
//! problems and authentication failures are reported to callers.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No address was supplied, or it was blank.
    #[error("Email parameter is required")]
    MissingEmail,

    /// The JSON body could not be decoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The query string could not be decoded.
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("At least one email parameter is required")]
    EmptyBatch,

    #[error("Batch of {size} addresses exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Unauthorized(&'static str),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingEmail
            | Self::InvalidBody(_)
            | Self::InvalidQuery(_)
            | Self::EmptyBatch
            | Self::BatchTooLarge { .. } => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
