use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
/// Used as the response format for health check endpoints.
///
/// ## Fields
/// - `status`: String indicating service availability ("UP" or "DOWN")
/// - `timestamp`: ISO 8601 formatted timestamp of the status check
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
#[derive(Serialize, Debug, PartialEq, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn up() -> Self {
        Self {
            status: "UP".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Size and age of the active disposable-domain blocklist.
#[derive(Serialize, Debug, PartialEq, Deserialize, ToSchema)]
pub struct BlocklistStatus {
    /// Number of domains in the active snapshot; 0 before the first load.
    pub domains: usize,
    pub loaded_at: Option<String>,
}

impl BlocklistStatus {
    pub fn new(domains: usize, loaded_at: Option<DateTime<Utc>>) -> Self {
        Self {
            domains,
            loaded_at: loaded_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// # Service Status Response
///
/// ## Example JSON
/// ```json
/// {
///   "status": "OK",
///   "version": "0.3.0",
///   "timestamp": "2024-03-10T15:30:45.123456789Z",
///   "blocklist": { "domains": 3412, "loaded_at": "2024-03-10T00:00:01Z" }
/// }
/// ```
#[derive(Serialize, Debug, PartialEq, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub blocklist: BlocklistStatus,
}

impl StatusResponse {
    pub fn ok(blocklist: BlocklistStatus) -> Self {
        Self {
            status: "OK".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
            blocklist,
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Deserialize, ToSchema)]
pub struct RapidApiHealth {
    pub status: String,
}

impl RapidApiHealth {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}
