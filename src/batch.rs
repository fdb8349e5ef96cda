use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, error};

use crate::models::{ValidationResult, ValidationStatus};
use crate::pipeline::ValidationPipeline;
use crate::validation::syntax::is_valid_email;

/// Validates many addresses concurrently with a bounded number in flight.
///
/// The permit pool is shared by every batch the service handles, so the total
/// number of concurrent validations stays bounded across requests.
pub struct BatchValidationService {
    pipeline: Arc<ValidationPipeline>,
    permits: Arc<Semaphore>,
}

impl BatchValidationService {
    pub fn new(pipeline: Arc<ValidationPipeline>, concurrency: usize) -> Self {
        Self {
            pipeline,
            permits: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }

    /// Returns one result per address, in input order, once all are done.
    pub async fn validate_all(&self, addresses: &[String]) -> Vec<ValidationResult> {
        debug!("Validating batch of {} addresses", addresses.len());

        let tasks = addresses
            .iter()
            .map(|address| {
                let pipeline = Arc::clone(&self.pipeline);
                let permits = Arc::clone(&self.permits);
                let address = address.clone();
                tokio::spawn(async move {
                    let _permit = permits.acquire_owned().await.ok();
                    pipeline.validate(&address).await
                })
            })
            .collect::<Vec<_>>();

        join_all(tasks)
            .await
            .into_iter()
            .zip(addresses)
            .map(|(joined, address)| match joined {
                Ok(result) => result,
                Err(e) => {
                    error!("Validation task for {} failed: {}", address, e);
                    fallback_result(address)
                }
            })
            .collect()
    }
}

/// Conservative verdict for a slot whose validation task died.
fn fallback_result(address: &str) -> ValidationResult {
    let mut result = ValidationResult::new(address);
    if is_valid_email(address.trim()) {
        result.validations.syntax_valid = true;
        result.status = ValidationStatus::InvalidDomain;
    } else {
        result.status = ValidationStatus::InvalidSyntax;
    }
    result
}
