use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Defines the API contract using OpenAPI 3.0 format with utoipa procedural macros.
/// The document is served as `/api-docs/openapi.json` and browsable through
/// Swagger UI at `/swagger-ui/`.
///
/// # Endpoints
/// - Health Check: `GET /api/health`, `GET /api/status`, `GET /api/rapidapi-health`
/// - Email Validation: `/api/validate`, `/api/validate/batch`,
///   `/api/typo-suggestions`, `/api/check-disposable` (GET and POST)
///
/// # Note
/// The OpenAPI spec is generated at compile time from these annotations. Any changes
/// to the API surface should be reflected here first to maintain documentation accuracy.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::health::status,
        crate::routes::health::rapidapi_health,
        crate::routes::email::validate_email_get,
        crate::routes::email::validate_email_post,
        crate::routes::email::validate_batch_get,
        crate::routes::email::validate_batch_post,
        crate::routes::email::typo_suggestions_get,
        crate::routes::email::typo_suggestions_post,
        crate::routes::disposable::check_disposable_get,
        crate::routes::disposable::check_disposable_post,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::health::StatusResponse,
            crate::models::health::BlocklistStatus,
            crate::models::health::RapidApiHealth,
            crate::models::email::EmailRequest,
            crate::models::email::BatchEmailRequest,
            crate::models::email::ValidationStatus,
            crate::models::email::Validations,
            crate::models::email::ValidationResult,
            crate::models::email::TypoSuggestionResponse,
            crate::models::email::BatchValidationResponse,
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Email Validation", description = "Email address validation endpoints")
    ),
    info(
        description = "Email address validation: syntax, domain DNS, disposable, role and alias checks",
        title = "Email Validator API",
        version = "0.3.0",
    )
)]
pub struct ApiDoc;
