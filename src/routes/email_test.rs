use super::*;
use crate::models::email::{BatchValidationResponse, TypoSuggestionResponse};
use crate::models::health::StatusResponse;
use crate::models::{ValidationResult, ValidationStatus};
use crate::validation::blocklist::{DisposableBlocklist, MockBlocklistSource};
use crate::validation::cache::MemoryDomainCache;
use crate::validation::dnsmx::MockDnsResolver;
use crate::validation::domain::DomainValidator;
use crate::validation::typo::TypoSuggester;
use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::json;
use std::time::Duration;

const BATCH_LIMIT: usize = 3;

/// Every domain resolves except `.invalid` and `gmial.com`.
fn resolver() -> MockDnsResolver {
    let mut resolver = MockDnsResolver::new();
    resolver
        .expect_resolve()
        .returning(|domain| Ok(!domain.ends_with(".invalid") && domain != "gmial.com"));
    resolver
}

async fn state(loaded: bool) -> web::Data<AppState> {
    let mut source = MockBlocklistSource::new();
    source
        .expect_fetch()
        .returning(|| Ok("tempinbox.example\n".to_string()));
    let blocklist = Arc::new(DisposableBlocklist::new(Arc::new(source)));
    if loaded {
        blocklist.load().await.unwrap();
    }

    let domains = DomainValidator::new(
        Arc::new(resolver()),
        Arc::new(MemoryDomainCache::new()),
        Duration::from_secs(600),
        Duration::from_secs(30),
    );
    let pipeline = Arc::new(ValidationPipeline::new(
        domains,
        blocklist,
        TypoSuggester::default(),
    ));

    web::Data::new(AppState {
        batch: Arc::new(BatchValidationService::new(Arc::clone(&pipeline), 4)),
        pipeline,
        batch_max_size: BATCH_LIMIT,
    })
}

macro_rules! test_app {
    ($loaded:expr) => {
        test::init_service(
            App::new()
                .app_data(state($loaded).await)
                .configure(configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_validate_get() {
    let app = test_app!(true);
    let req = test::TestRequest::get()
        .uri("/api/validate?email=test@gmail.com")
        .to_request();

    let result: ValidationResult = test::call_and_read_body_json(&app, req).await;

    assert_eq!(result.address, "test@gmail.com");
    assert_eq!(result.status, ValidationStatus::Valid);
}

#[actix_web::test]
async fn test_validate_post() {
    let app = test_app!(true);
    let req = test::TestRequest::post()
        .uri("/api/validate")
        .set_json(json!({ "email": "admin@example.com" }))
        .to_request();

    let result: ValidationResult = test::call_and_read_body_json(&app, req).await;

    assert_eq!(result.status, ValidationStatus::RoleAccount);
    assert!(result.validations.is_role);
}

#[actix_web::test]
async fn test_invalid_address_is_still_200() {
    let app = test_app!(true);
    let req = test::TestRequest::get()
        .uri("/api/validate?email=bad-address")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body_json["status"], "INVALID_SYNTAX");
    assert_eq!(body_json["validations"]["syntax_valid"], false);
}

#[actix_web::test]
async fn test_missing_email_is_bad_request() {
    let app = test_app!(true);

    for uri in ["/api/validate", "/api/validate?email=", "/api/typo-suggestions"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body = test::read_body(resp).await;
        let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body_json["error"], "Email parameter is required");
    }
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = test_app!(true);
    let req = test::TestRequest::post()
        .uri("/api/validate")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"email": "#)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(
        body_json["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body")
    );
}

#[actix_web::test]
async fn test_unsupported_method() {
    let app = test_app!(true);

    for uri in [
        "/api/validate",
        "/api/validate/batch",
        "/api/typo-suggestions",
        "/api/check-disposable",
        "/api/status",
    ] {
        let req = test::TestRequest::delete().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", uri);
    }
}

#[actix_web::test]
async fn test_batch_get_keeps_order() {
    let app = test_app!(true);
    let req = test::TestRequest::get()
        .uri("/api/validate/batch?email=bad-address&email=test@gmail.com&email=user@mailinator.com")
        .to_request();

    let resp: BatchValidationResponse = test::call_and_read_body_json(&app, req).await;

    let addresses: Vec<_> = resp.results.iter().map(|r| r.address.as_str()).collect();
    assert_eq!(
        addresses,
        vec!["bad-address", "test@gmail.com", "user@mailinator.com"]
    );
    assert_eq!(resp.results[0].status, ValidationStatus::InvalidSyntax);
    assert_eq!(resp.results[2].status, ValidationStatus::Disposable);
    assert_eq!(resp.valid_count, 1);
    assert_eq!(resp.invalid_count, 2);
}

#[actix_web::test]
async fn test_batch_get_without_email_is_bad_request() {
    let app = test_app!(true);
    let req = test::TestRequest::get()
        .uri("/api/validate/batch")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_batch_post() {
    let app = test_app!(true);
    let req = test::TestRequest::post()
        .uri("/api/validate/batch")
        .set_json(json!({ "emails": ["user+promo@gmail.com", "user@tempinbox.example"] }))
        .to_request();

    let resp: BatchValidationResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.results.len(), 2);
    assert_eq!(resp.results[0].status, ValidationStatus::Alias);
    assert_eq!(
        resp.results[1].status,
        ValidationStatus::DisposableByExternalBlocklist
    );
}

#[actix_web::test]
async fn test_batch_post_empty_list() {
    let app = test_app!(true);
    let req = test::TestRequest::post()
        .uri("/api/validate/batch")
        .set_json(json!({ "emails": [] }))
        .to_request();

    let resp: BatchValidationResponse = test::call_and_read_body_json(&app, req).await;

    assert!(resp.results.is_empty());
    assert_eq!(resp.valid_count, 0);
}

#[actix_web::test]
async fn test_batch_over_limit_is_rejected() {
    let app = test_app!(true);
    let req = test::TestRequest::post()
        .uri("/api/validate/batch")
        .set_json(json!({ "emails": ["a@example.com", "b@example.com", "c@example.com", "d@example.com"] }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body_json["error"],
        "Batch of 4 addresses exceeds the limit of 3"
    );
}

#[actix_web::test]
async fn test_typo_suggestions() {
    let app = test_app!(true);

    let req = test::TestRequest::get()
        .uri("/api/typo-suggestions?email=someone@gmial.com")
        .to_request();
    let resp: TypoSuggestionResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.email, "someone@gmial.com");
    assert_eq!(resp.suggestion.as_deref(), Some("someone@gmail.com"));

    let req = test::TestRequest::post()
        .uri("/api/typo-suggestions")
        .set_json(json!({ "email": "someone@gmail.com" }))
        .to_request();
    let resp: TypoSuggestionResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.suggestion, None);
}

#[actix_web::test]
async fn test_check_disposable() {
    let app = test_app!(true);

    let req = test::TestRequest::get()
        .uri("/api/check-disposable?email=user@tempinbox.example")
        .to_request();
    let result: ValidationResult = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        result.status,
        ValidationStatus::DisposableByExternalBlocklist
    );
    assert!(result.validations.is_disposable);

    let req = test::TestRequest::post()
        .uri("/api/check-disposable")
        .set_json(json!({ "email": "test@gmail.com" }))
        .to_request();
    let result: ValidationResult = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.status, ValidationStatus::Valid);
}

#[actix_web::test]
async fn test_status_before_blocklist_load() {
    let app = test_app!(false);
    let req = test::TestRequest::get().uri("/api/status").to_request();

    let resp: StatusResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.status, "OK");
    assert_eq!(resp.blocklist.domains, 0);
    assert!(resp.blocklist.loaded_at.is_none());
}

#[actix_web::test]
async fn test_status_after_blocklist_load() {
    let app = test_app!(true);
    let req = test::TestRequest::get().uri("/api/status").to_request();

    let resp: StatusResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.blocklist.domains, 1);
    assert!(resp.blocklist.loaded_at.is_some());
}

#[actix_web::test]
async fn test_health_under_api_scope() {
    let app = test_app!(false);

    for uri in ["/api/health", "/api/rapidapi-health"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "{}", uri);
    }
}
