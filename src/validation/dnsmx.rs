use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use trust_dns_resolver::{
    TokioAsyncResolver,
    config::{ResolverConfig, ResolverOpts},
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    system_conf::read_system_conf,
};

/// A lookup that could not reach a verdict.
///
/// Confirmed absence (NXDOMAIN, no MX and no A/AAAA records) is not an error:
/// it is reported as `Ok(false)`. Everything here is transient.
#[derive(Debug, Error)]
pub enum DnsError {
    #[error("DNS query timed out for domain: {0}")]
    Timeout(String),

    #[error("DNS lookup failed: {0}")]
    LookupFailed(#[from] ResolveError),
}

/// Answers "can this domain plausibly receive mail".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// * `Ok(true)` - the domain has MX records, or A/AAAA records to fall back on
    /// * `Ok(false)` - the domain does not exist or has no usable records
    /// * `Err(_)` - timeout or resolver failure, verdict unknown
    async fn resolve(&self, domain: &str) -> Result<bool, DnsError>;
}

/// [`DnsResolver`] using the system resolver configuration, or public DNS
/// when none can be read.
pub struct TrustDnsResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl TrustDnsResolver {
    /// Creates a resolver whose whole MX-then-A/AAAA lookup is bounded by
    /// `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let (config, mut opts) = read_system_conf().unwrap_or_else(|e| {
            warn!("Failed to read system DNS configuration, using defaults: {}", e);
            (ResolverConfig::default(), ResolverOpts::default())
        });
        opts.timeout = timeout;
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            timeout,
        }
    }

    /// Checks DNS records for a domain following RFC 5321 section 5.1
    ///
    /// 1. MX records (mail server configuration)
    /// 2. If there are none, A (IPv4) or AAAA (IPv6) records as an implicit MX
    async fn check_mx_or_a_records(&self, domain: &str) -> Result<bool, DnsError> {
        let fqdn = if domain.ends_with('.') {
            domain.to_string()
        } else {
            format!("{}.", domain)
        };

        match self.resolver.mx_lookup(fqdn.as_str()).await {
            Ok(records) if records.iter().next().is_some() => {
                debug!("Domain {} has MX records", domain);
                return Ok(true);
            }
            Ok(_) => debug!("MX lookup for {} returned no records", domain),
            Err(err) if is_no_records(&err) => {
                debug!("No MX records for {}, falling back to A/AAAA", domain)
            }
            Err(err) => return Err(err.into()),
        }

        match self.resolver.lookup_ip(fqdn.as_str()).await {
            Ok(ips) => Ok(ips.iter().next().is_some()),
            Err(err) if is_no_records(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl DnsResolver for TrustDnsResolver {
    async fn resolve(&self, domain: &str) -> Result<bool, DnsError> {
        match tokio::time::timeout(self.timeout, self.check_mx_or_a_records(domain)).await {
            Ok(Err(DnsError::LookupFailed(err))) if matches!(err.kind(), ResolveErrorKind::Timeout) => {
                Err(DnsError::Timeout(domain.to_string()))
            }
            Ok(result) => result,
            Err(_) => Err(DnsError::Timeout(domain.to_string())),
        }
    }
}

/// Whether the error is an authoritative "nothing here" answer.
///
/// NXDOMAIN and NODATA both surface as `NoRecordsFound`, but so do SERVFAIL,
/// REFUSED and the other failure codes. Only the first two confirm absence.
fn is_no_records(err: &ResolveError) -> bool {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => {
            matches!(response_code, ResponseCode::NXDomain | ResponseCode::NoError)
        }
        _ => false,
    }
}
