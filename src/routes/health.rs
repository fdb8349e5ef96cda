use actix_web::{HttpResponse, Responder, get, web};

use super::{AppState, method_not_allowed};
use crate::models::health::{BlocklistStatus, HealthResponse, RapidApiHealth, StatusResponse};

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp.
///
/// ## Response
///
/// - **200 OK**: Service is healthy
///   - Body: JSON object with `status` ("UP") and `timestamp` in ISO 8601 format
///
/// ## Example Response
///
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2023-10-05T12:34:56.789Z"
/// }
/// ```
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Health Check"
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse::up())
}

/// # Service Status Endpoint
///
/// Reports the service version and the state of the disposable blocklist.
/// `blocklist.domains` is 0 and `loaded_at` null until the first successful
/// load.
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Service status", body = StatusResponse)
    ),
    tag = "Health Check"
)]
pub async fn status(state: web::Data<AppState>) -> impl Responder {
    let blocklist = match state.pipeline.blocklist().snapshot() {
        Some(snapshot) => BlocklistStatus::new(snapshot.len(), Some(snapshot.loaded_at())),
        None => BlocklistStatus::new(0, None),
    };
    HttpResponse::Ok().json(StatusResponse::ok(blocklist))
}

/// Static probe for the API marketplace proxy.
#[utoipa::path(
    get,
    path = "/api/rapidapi-health",
    responses(
        (status = 200, description = "Service is up", body = RapidApiHealth)
    ),
    tag = "Health Check"
)]
pub async fn rapidapi_health() -> impl Responder {
    HttpResponse::Ok().json(RapidApiHealth::ok())
}

/// # Route Configuration
///
/// ## Currently Configured Routes
///
/// - `GET /health`: Liveness probe
/// - `GET /status`: Version and blocklist status
/// - `GET /rapidapi-health`: Marketplace probe
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(
            web::resource("/status")
                .route(web::get().to(status))
                .default_service(web::to(method_not_allowed)),
        )
        .service(
            web::resource("/rapidapi-health")
                .route(web::get().to(rapidapi_health))
                .default_service(web::to(method_not_allowed)),
        );
}
