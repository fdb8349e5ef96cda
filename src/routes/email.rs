use actix_web::{HttpResponse, web};
use tracing::debug;

use super::{AppState, method_not_allowed, required_email};
use crate::error::ApiError;
use crate::models::email::{
    BatchEmailRequest, BatchValidationResponse, EmailQuery, EmailRequest, TypoSuggestionResponse,
    ValidationResult,
};

/// # Email Validation Endpoint
///
/// Runs the full validation pipeline on one address: syntax, domain DNS
/// (MX, then A/AAAA), disposable domain, role account and alias checks.
///
/// ## Responses
/// - **200 OK**: Validation result, whatever the verdict
/// - **400 Bad Request**: Missing or blank `email`
///
/// ## Example Request
/// ```text
/// GET /api/validate?email=user@example.com
/// ```
#[utoipa::path(
    get,
    path = "/api/validate",
    params(EmailQuery),
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Missing email parameter")
    ),
    tag = "Email Validation"
)]
pub async fn validate_email_get(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, ApiError> {
    let email = required_email(&query.email)?;
    Ok(HttpResponse::Ok().json(state.pipeline.validate(email).await))
}

/// # Email Validation Endpoint (JSON body)
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
#[utoipa::path(
    post,
    path = "/api/validate",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidationResult),
        (status = 400, description = "Invalid request body")
    ),
    tag = "Email Validation"
)]
pub async fn validate_email_post(
    state: web::Data<AppState>,
    req: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = required_email(&req.email)?;
    Ok(HttpResponse::Ok().json(state.pipeline.validate(email).await))
}

/// # Batch Email Validation Endpoint
///
/// Validates every `email` query parameter concurrently. Results keep the
/// order of the parameters.
///
/// ## Example Request
/// ```text
/// GET /api/validate/batch?email=a@example.com&email=b@example.com
/// ```
#[utoipa::path(
    get,
    path = "/api/validate/batch",
    params(
        ("email" = Vec<String>, Query, description = "Address to validate; repeat for each address")
    ),
    responses(
        (status = 200, description = "Batch validation results", body = BatchValidationResponse),
        (status = 400, description = "No email parameter, or too many")
    ),
    tag = "Email Validation"
)]
pub async fn validate_batch_get(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let emails: Vec<String> = query
        .into_inner()
        .into_iter()
        .filter(|(key, _)| key == "email")
        .map(|(_, value)| value)
        .collect();

    if emails.is_empty() {
        return Err(ApiError::EmptyBatch);
    }
    validate_batch(&state, emails).await
}

/// # Batch Email Validation Endpoint (JSON body)
///
/// ## Example Request
/// ```json
/// { "emails": ["user1@example.com", "user2@example.com"] }
/// ```
#[utoipa::path(
    post,
    path = "/api/validate/batch",
    request_body = BatchEmailRequest,
    responses(
        (status = 200, description = "Batch validation results", body = BatchValidationResponse),
        (status = 400, description = "Invalid request body, or too many addresses")
    ),
    tag = "Email Validation"
)]
pub async fn validate_batch_post(
    state: web::Data<AppState>,
    req: web::Json<BatchEmailRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_batch(&state, req.into_inner().emails).await
}

async fn validate_batch(state: &AppState, emails: Vec<String>) -> Result<HttpResponse, ApiError> {
    if emails.len() > state.batch_max_size {
        return Err(ApiError::BatchTooLarge {
            size: emails.len(),
            limit: state.batch_max_size,
        });
    }

    let results = state.batch.validate_all(&emails).await;
    let response = BatchValidationResponse::from_results(results);
    debug!(
        "Batch done: {} valid, {} invalid",
        response.valid_count, response.invalid_count
    );
    Ok(HttpResponse::Ok().json(response))
}

/// # Typo Suggestion Endpoint
///
/// Suggests a corrected address when the domain does not resolve and is a
/// near miss of a common provider (`someone@gmial.com` -> `someone@gmail.com`).
#[utoipa::path(
    get,
    path = "/api/typo-suggestions",
    params(EmailQuery),
    responses(
        (status = 200, description = "Suggestion, or null", body = TypoSuggestionResponse),
        (status = 400, description = "Missing email parameter")
    ),
    tag = "Email Validation"
)]
pub async fn typo_suggestions_get(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, ApiError> {
    let email = required_email(&query.email)?;
    suggest(&state, email).await
}

#[utoipa::path(
    post,
    path = "/api/typo-suggestions",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Suggestion, or null", body = TypoSuggestionResponse),
        (status = 400, description = "Invalid request body")
    ),
    tag = "Email Validation"
)]
pub async fn typo_suggestions_post(
    state: web::Data<AppState>,
    req: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = required_email(&req.email)?;
    suggest(&state, email).await
}

async fn suggest(state: &AppState, email: &str) -> Result<HttpResponse, ApiError> {
    let suggestion = state.pipeline.suggest_typo(email).await;
    Ok(HttpResponse::Ok().json(TypoSuggestionResponse {
        email: email.to_string(),
        suggestion,
    }))
}

/// Configures email validation routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/validate")
            .route(web::get().to(validate_email_get))
            .route(web::post().to(validate_email_post))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/validate/batch")
            .route(web::get().to(validate_batch_get))
            .route(web::post().to(validate_batch_post))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/typo-suggestions")
            .route(web::get().to(typo_suggestions_get))
            .route(web::post().to(typo_suggestions_post))
            .default_service(web::to(method_not_allowed)),
    );
}
