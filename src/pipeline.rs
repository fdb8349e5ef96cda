//! Ordered validation of a single address.
//!
//! Each check is a [`Gate`] evaluated in the fixed order of [`GATES`]. A gate
//! either lets evaluation continue or halts it with a terminal status. Status
//! is only ever replaced while it is still `VALID`, so a later gate cannot
//! overwrite an earlier failure.

use std::sync::Arc;
use tracing::debug;

use crate::models::{ValidationResult, ValidationStatus};
use crate::validation::alias::{canonicalize, is_alias};
use crate::validation::blocklist::DisposableBlocklist;
use crate::validation::disposable::is_locally_disposable;
use crate::validation::domain::DomainValidator;
use crate::validation::role::is_role;
use crate::validation::syntax::{self, split_address};
use crate::validation::typo::TypoSuggester;

/// One named check of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Grammar check; failure is `INVALID_SYNTAX`, terminal.
    Syntax,
    /// DNS check; failure is `INVALID_DOMAIN`, terminal, with a typo suggestion.
    Domain,
    /// Local list, then external blocklist; a match is terminal.
    Disposable,
    /// Role local part; recorded, evaluation continues.
    Role,
    /// Sub-address or dot alias; recorded, only relabels a `VALID` result.
    Alias,
}

/// Evaluation order. Local checks run before the DNS round trip.
pub const GATES: [Gate; 5] = [
    Gate::Syntax,
    Gate::Domain,
    Gate::Disposable,
    Gate::Role,
    Gate::Alias,
];

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// Result under construction plus the parsed address it describes.
struct Draft<'a> {
    address: &'a str,
    local_part: &'a str,
    domain: &'a str,
    result: ValidationResult,
}

impl Draft<'_> {
    fn set_status(&mut self, status: ValidationStatus) {
        if self.result.status.is_valid() {
            self.result.status = status;
        }
    }
}

pub struct ValidationPipeline {
    domains: DomainValidator,
    blocklist: Arc<DisposableBlocklist>,
    typos: TypoSuggester,
}

impl ValidationPipeline {
    pub fn new(
        domains: DomainValidator,
        blocklist: Arc<DisposableBlocklist>,
        typos: TypoSuggester,
    ) -> Self {
        Self {
            domains,
            blocklist,
            typos,
        }
    }

    /// Runs every gate in order and returns the final verdict.
    ///
    /// Surrounding whitespace is ignored for checking; the result echoes the
    /// address exactly as given.
    #[tracing::instrument(skip(self))]
    pub async fn validate(&self, address: &str) -> ValidationResult {
        let trimmed = address.trim();
        let (local_part, domain) = split_address(trimmed).unwrap_or(("", ""));
        let mut draft = Draft {
            address: trimmed,
            local_part,
            domain,
            result: ValidationResult::new(address),
        };

        for gate in GATES {
            if self.apply(gate, &mut draft).await == Flow::Halt {
                debug!("Gate {:?} halted validation", gate);
                break;
            }
        }

        debug!("Validated {}: {:?}", address, draft.result.status);
        draft.result
    }

    /// Validates and then re-checks the external blocklist for results that
    /// came out `VALID`, in case a snapshot was published meanwhile.
    pub async fn check_disposable(&self, address: &str) -> ValidationResult {
        let result = self.validate(address).await;
        if !result.status.is_valid() {
            return result;
        }

        match split_address(address.trim()) {
            Some((_, domain)) if self.blocklist.is_disposable(domain) => {
                result.mark_externally_disposable()
            }
            _ => result,
        }
    }

    /// Suggests a corrected address when the domain looks like a typo of a
    /// common provider. Domains that resolve get no suggestion.
    pub async fn suggest_typo(&self, address: &str) -> Option<String> {
        let (local_part, domain) = split_address(address.trim())?;

        if syntax::is_valid_domain(domain) && self.domains.is_valid_domain(domain).await {
            return None;
        }

        self.typos
            .suggest(domain)
            .map(|suggested| format!("{}@{}", local_part, suggested))
    }

    pub fn blocklist(&self) -> &Arc<DisposableBlocklist> {
        &self.blocklist
    }

    async fn apply(&self, gate: Gate, draft: &mut Draft<'_>) -> Flow {
        match gate {
            Gate::Syntax => {
                if !syntax::is_valid_email(draft.address) {
                    draft.set_status(ValidationStatus::InvalidSyntax);
                    return Flow::Halt;
                }
                draft.result.validations.syntax_valid = true;
                Flow::Continue
            }
            Gate::Domain => {
                if self.domains.is_valid_domain(draft.domain).await {
                    draft.result.validations.domain_has_mx = true;
                    return Flow::Continue;
                }
                draft.set_status(ValidationStatus::InvalidDomain);
                draft.result.typo_suggestion = self.typos.suggest(draft.domain);
                Flow::Halt
            }
            Gate::Disposable => {
                let status = if is_locally_disposable(draft.domain) {
                    ValidationStatus::Disposable
                } else if self.blocklist.is_disposable(draft.domain) {
                    ValidationStatus::DisposableByExternalBlocklist
                } else {
                    return Flow::Continue;
                };
                draft.result.validations.is_disposable = true;
                draft.set_status(status);
                Flow::Halt
            }
            Gate::Role => {
                if is_role(draft.local_part) {
                    draft.result.validations.is_role = true;
                    draft.set_status(ValidationStatus::RoleAccount);
                }
                Flow::Continue
            }
            Gate::Alias => {
                if is_alias(draft.address) {
                    draft.result.validations.is_alias = true;
                    draft.set_status(ValidationStatus::Alias);
                }
                draft.result.validations.canonical_address = Some(canonicalize(draft.address));
                Flow::Continue
            }
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
