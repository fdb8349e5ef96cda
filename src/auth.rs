use actix_web::dev::{Service, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, Result, dev::ServiceRequest};
use sha2::{Digest, Sha256};
use std::future::{Ready, ready};
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const PROXY_SECRET_HEADER: &str = "X-RapidAPI-Proxy-Secret";

/// Paths reachable without a key.
const OPEN_PATHS: &[&str] = &["/api/health", "/api/rapidapi-health"];

fn digest(key: &str) -> Vec<u8> {
    Sha256::digest(key.as_bytes()).to_vec()
}

/// API-key allowlist. Keys are kept only as SHA-256 digests.
#[derive(Clone)]
pub struct ApiKeyGuard {
    digests: Arc<[Vec<u8>]>,
}

impl ApiKeyGuard {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let digests: Vec<Vec<u8>> = keys
            .into_iter()
            .map(|key| key.as_ref().trim().to_string())
            .filter(|key| !key.is_empty())
            .map(|key| digest(&key))
            .collect();

        Self {
            digests: digests.into(),
        }
    }

    /// `false` when no keys are configured; every request is let through.
    pub fn is_enabled(&self) -> bool {
        !self.digests.is_empty()
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        let candidate = digest(key);
        self.digests.iter().any(|allowed| *allowed == candidate)
    }

    fn check(&self, req: &ServiceRequest) -> Result<(), ApiError> {
        let path = req.path();
        if !self.is_enabled() || !path.starts_with("/api") || OPEN_PATHS.contains(&path) {
            return Ok(());
        }

        let key = [API_KEY_HEADER, PROXY_SECRET_HEADER]
            .iter()
            .find_map(|name| req.headers().get(*name))
            .and_then(|value| value.to_str().ok());

        match key {
            Some(key) if self.is_allowed(key) => Ok(()),
            Some(_) => {
                debug!("Rejected request to {} with unknown API key", path);
                Err(ApiError::Unauthorized("Invalid API key"))
            }
            None => Err(ApiError::Unauthorized("Missing API key")),
        }
    }
}

pub struct ApiKeyMiddleware<S> {
    service: S,
    guard: ApiKeyGuard,
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Err(e) = self.guard.check(&req) {
            return Box::pin(ready(Err(e.into())));
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddleware {
            service,
            guard: self.clone(),
        }))
    }
}
