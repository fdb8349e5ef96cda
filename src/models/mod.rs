/// Request and response payloads of the email validation endpoints.
pub mod email;

/// # Health Status Response
///
/// Payloads of the liveness and status endpoints.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
pub mod health;

pub use email::{ValidationResult, ValidationStatus};
