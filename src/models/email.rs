use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct BatchEmailRequest {
    pub emails: Vec<String>,
}

/// Query string form of [`EmailRequest`].
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Address to check
    #[serde(default)]
    pub email: String,
}

/// Outcome of validating one address. Exactly one status per result.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Valid,
    InvalidSyntax,
    InvalidDomain,
    Disposable,
    DisposableByExternalBlocklist,
    RoleAccount,
    Alias,
}

impl ValidationStatus {
    pub fn is_valid(self) -> bool {
        self == Self::Valid
    }
}

/// Individual check outcomes recorded alongside the final status.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct Validations {
    pub syntax_valid: bool,
    pub domain_has_mx: bool,
    pub is_disposable: bool,
    pub is_role: bool,
    pub is_alias: bool,
    pub canonical_address: Option<String>,
}

/// # Validation Result
///
/// Response body of `/api/validate` and one element of a batch response.
///
/// ## Example JSON
/// ```json
/// {
///   "address": "admin@example.com",
///   "status": "ROLE_ACCOUNT",
///   "validations": {
///     "syntax_valid": true,
///     "domain_has_mx": true,
///     "is_disposable": false,
///     "is_role": true,
///     "is_alias": false,
///     "canonical_address": "admin@example.com"
///   },
///   "typo_suggestion": null
/// }
/// ```
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub address: String,
    pub status: ValidationStatus,
    pub validations: Validations,
    /// Suggested domain when the given one did not resolve.
    pub typo_suggestion: Option<String>,
}

impl ValidationResult {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            status: ValidationStatus::Valid,
            validations: Validations::default(),
            typo_suggestion: None,
        }
    }

    /// Re-labels a still-valid result as caught by the external blocklist.
    /// Any other status is returned unchanged.
    pub fn mark_externally_disposable(mut self) -> Self {
        if self.status.is_valid() {
            self.validations.is_disposable = true;
            self.status = ValidationStatus::DisposableByExternalBlocklist;
        }
        self
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq, Eq)]
pub struct TypoSuggestionResponse {
    pub email: String,
    /// Corrected address, when a likely typo was found.
    pub suggestion: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct BatchValidationResponse {
    pub results: Vec<ValidationResult>,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl BatchValidationResponse {
    pub fn from_results(results: Vec<ValidationResult>) -> Self {
        let valid_count = results.iter().filter(|r| r.status.is_valid()).count();
        let invalid_count = results.len() - valid_count;

        Self {
            results,
            valid_count,
            invalid_count,
        }
    }
}
