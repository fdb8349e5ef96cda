/// Canonical forms for sub-addressed and dot-insensitive mailboxes.
///
/// # Examples
/// ```
/// use email_validator::validation::alias::{canonicalize, is_alias};
///
/// assert_eq!(canonicalize("user+promo@gmail.com"), "user@gmail.com");
/// assert!(!is_alias("user@example.com"));
/// ```
pub mod alias;

pub mod blocklist;

/// Time-bounded cache of domain resolvability results.
///
/// Two backends implement [`cache::DomainCache`]: an in-process map and Redis.
pub mod cache;

/// Local list of well-known disposable email providers.
pub mod disposable;

/// Checks whether a domain can receive mail by looking up DNS records.
///
/// The lookup performed by [`dnsmx::TrustDnsResolver`]:
/// 1. Checks for MX (Mail Exchange) records first
/// 2. Falls back to A/AAAA records if MX records are not found
///
/// A definite "no records" answer is `Ok(false)`. Timeouts and resolver
/// failures are returned as errors so callers can cache them briefly.
pub mod dnsmx;

/// Cached domain validation on top of [`dnsmx`] and [`cache`].
pub mod domain;

pub mod role;

/// Validates an email address syntax.
///
/// Accepts the common dot-atom form of the local part and a hostname
/// domain with at least two labels. Quoted local parts and address literals
/// are rejected.
///
/// # Examples
/// ```
/// use email_validator::validation::syntax::is_valid_email;
///
/// assert!(is_valid_email("user.name+tag@example.com"));
/// assert!(!is_valid_email("invalid@ex_mple.com"));
/// assert!(!is_valid_email("no-at-sign.example.com"));
/// ```
///
/// # Arguments
/// * `email` - A string slice containing the email address to validate
///
/// # Returns
/// `true` if the email address meets all syntax requirements, `false` otherwise
pub mod syntax;

/// Domain typo suggestions for common mail providers.
pub mod typo;
