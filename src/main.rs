use actix_web::{App, HttpServer, web::Data};
use email_validator::auth::ApiKeyGuard;
use email_validator::batch::BatchValidationService;
use email_validator::config::Config;
use email_validator::logging;
use email_validator::openapi::ApiDoc;
use email_validator::pipeline::ValidationPipeline;
use email_validator::routes::{self, AppState};
use email_validator::validation::blocklist::{
    DisposableBlocklist, HttpBlocklistSource, RefreshScheduler,
};
use email_validator::validation::cache::{DomainCache, MemoryDomainCache, RedisDomainCache};
use email_validator::validation::dnsmx::TrustDnsResolver;
use email_validator::validation::domain::DomainValidator;
use email_validator::validation::typo::TypoSuggester;
use std::io::{Error, ErrorKind};
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Email Validator Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - the validation API under `/api` (configured in routes)
/// - Swagger UI for API documentation
/// - Environment configuration via `.env` file
/// - a background task refreshing the disposable-domain blocklist
///
/// # Endpoints
/// - Validation: `/api/validate`, `/api/validate/batch`, `/api/typo-suggestions`,
///   `/api/check-disposable`
/// - Status: `/api/health`, `/api/status`, `/api/rapidapi-health`
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// - Server binds to `0.0.0.0:8080` by default (`HOST`, `PORT`)
/// - Environment variables loaded from `.env` file (if present)
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Loads `.env` first, so LOG_LEVEL from it is honoured.
    let config = Config::from_env();
    logging::init();
    let config = config.map_err(|e| {
        error!("Invalid configuration: {}", e);
        Error::new(ErrorKind::InvalidInput, e)
    })?;

    let cache: Arc<dyn DomainCache> = match config.redis_url.as_deref() {
        Some(url) => match RedisDomainCache::new(url) {
            Ok(cache) => {
                info!("Using Redis domain cache");
                Arc::new(cache)
            }
            Err(e) => {
                warn!("Invalid Redis URL, using in-memory domain cache: {}", e);
                Arc::new(MemoryDomainCache::new())
            }
        },
        None => {
            info!("REDIS_URL not set, using in-memory domain cache");
            Arc::new(MemoryDomainCache::new())
        }
    };

    let domains = DomainValidator::new(
        Arc::new(TrustDnsResolver::new(config.dns_timeout)),
        cache,
        config.domain_cache_ttl,
        config.transient_cache_ttl,
    );

    let source = HttpBlocklistSource::new(&config.blocklist_url, config.blocklist_fetch_timeout)
        .map_err(|e| {
            error!("Failed to create blocklist HTTP client: {}", e);
            Error::other(e)
        })?;
    let blocklist = Arc::new(DisposableBlocklist::new(Arc::new(source)));

    if let Err(e) = blocklist.load().await {
        warn!(
            "Initial blocklist load failed, external disposable check disabled until next refresh: {}",
            e
        );
    }
    let scheduler = RefreshScheduler::spawn(Arc::clone(&blocklist), config.blocklist_refresh_interval);

    let pipeline = Arc::new(ValidationPipeline::new(
        domains,
        blocklist,
        TypoSuggester::default(),
    ));
    let state = Data::new(AppState {
        batch: Arc::new(BatchValidationService::new(
            Arc::clone(&pipeline),
            config.batch_concurrency,
        )),
        pipeline,
        batch_max_size: config.batch_max_size,
    });

    let guard = ApiKeyGuard::new(&config.api_keys);
    if !guard.is_enabled() {
        warn!("API_KEYS not set, API key check disabled");
    }

    info!("Starting server on {}:{}", config.host, config.port);
    let server = HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .wrap(guard.clone())
            .app_data(state.clone())
            .configure(routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind((config.host.as_str(), config.port))
    .map_err(|e| {
        error!("Failed to bind {}:{}: {}", config.host, config.port, e);
        e
    })?
    .run();

    let result = server.await;

    info!("Server stopped, shutting down blocklist refresh");
    scheduler.shutdown().await;

    result
}
