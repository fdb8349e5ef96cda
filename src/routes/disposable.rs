use actix_web::{HttpResponse, web};

use super::{AppState, method_not_allowed, required_email};
use crate::error::ApiError;
use crate::models::email::{EmailQuery, EmailRequest, ValidationResult};

/// # Disposable Check Endpoint
///
/// Runs the full validation pipeline, then checks a still-`VALID` address
/// against the external disposable blocklist once more. A match is reported
/// as `DISPOSABLE_BY_EXTERNAL_BLOCKLIST`.
///
/// ## Example Request
/// ```text
/// GET /api/check-disposable?email=user@example.com
/// ```
#[utoipa::path(
    get,
    path = "/api/check-disposable",
    params(EmailQuery),
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Missing email parameter")
    ),
    tag = "Email Validation"
)]
pub async fn check_disposable_get(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, ApiError> {
    let email = required_email(&query.email)?;
    Ok(HttpResponse::Ok().json(state.pipeline.check_disposable(email).await))
}

#[utoipa::path(
    post,
    path = "/api/check-disposable",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Invalid request body")
    ),
    tag = "Email Validation"
)]
pub async fn check_disposable_post(
    state: web::Data<AppState>,
    req: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = required_email(&req.email)?;
    Ok(HttpResponse::Ok().json(state.pipeline.check_disposable(email).await))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/check-disposable")
            .route(web::get().to(check_disposable_get))
            .route(web::post().to(check_disposable_post))
            .default_service(web::to(method_not_allowed)),
    );
}
