use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::batch::BatchValidationService;
use crate::error::ApiError;
use crate::pipeline::ValidationPipeline;

/// # Health Check Endpoints
///
/// Liveness probe, marketplace probe and service status.
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2023-10-05T12:34:56.789Z"
/// }
/// ```
pub mod health;

/// # Email Validation Endpoints
///
/// Single and batch validation plus typo suggestions. Every endpoint accepts
/// GET with an `email` query parameter or POST with a JSON body.
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
pub mod email;

/// Validation followed by a forced external blocklist check.
pub mod disposable;

#[cfg(test)]
mod email_test;

/// Shared state handed to every handler.
pub struct AppState {
    pub pipeline: Arc<ValidationPipeline>,
    pub batch: Arc<BatchValidationService>,
    pub batch_max_size: usize,
}

/// # API Route Configuration
///
/// Mounts every endpoint under the `/api` base path. Malformed JSON bodies
/// and query strings are answered with a JSON 400.
///
/// ## Example Endpoints
///
/// ```text
/// GET  /api/health                     - Service liveness
/// GET  /api/status                     - Version and blocklist status
/// GET  /api/validate?email=...         - Validate one address
/// POST /api/validate/batch             - Validate many addresses
/// POST /api/typo-suggestions           - Suggest a corrected address
/// GET  /api/check-disposable?email=... - Validate with forced blocklist check
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ApiError::InvalidBody(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                ApiError::InvalidQuery(err.to_string()).into()
            }))
            .configure(health::configure_routes)
            .configure(email::configure_routes)
            .configure(disposable::configure_routes),
    );
}

/// Default service of every resource: any unregistered method.
pub(crate) async fn method_not_allowed() -> Result<HttpResponse, ApiError> {
    Err(ApiError::MethodNotAllowed)
}

/// Rejects a blank address.
pub(crate) fn required_email(email: &str) -> Result<&str, ApiError> {
    if email.trim().is_empty() {
        return Err(ApiError::MissingEmail);
    }
    Ok(email)
}
