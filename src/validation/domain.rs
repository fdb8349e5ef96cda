use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::cache::DomainCache;
use super::dnsmx::DnsResolver;

/// Decides whether a domain is mail-capable, consulting the cache before DNS.
///
/// Confirmed verdicts (resolvable, or definitively absent) are cached for the
/// full TTL. A negative verdict caused by a timeout or resolver failure is
/// cached for the shorter transient TTL so a network blip is retried soon.
pub struct DomainValidator {
    resolver: Arc<dyn DnsResolver>,
    cache: Arc<dyn DomainCache>,
    ttl: Duration,
    transient_ttl: Duration,
}

impl DomainValidator {
    pub fn new(
        resolver: Arc<dyn DnsResolver>,
        cache: Arc<dyn DomainCache>,
        ttl: Duration,
        transient_ttl: Duration,
    ) -> Self {
        Self {
            resolver,
            cache,
            ttl,
            transient_ttl,
        }
    }

    /// Returns `true` when the domain has MX or A/AAAA records.
    ///
    /// Never fails: cache backend errors count as a miss, DNS errors as
    /// "not resolvable".
    pub async fn is_valid_domain(&self, domain: &str) -> bool {
        let domain = normalize_domain(domain);

        match self.cache.get(&domain).await {
            Ok(Some(resolvable)) => {
                debug!("Domain cache hit for {}: {}", domain, resolvable);
                return resolvable;
            }
            Ok(None) => debug!("Domain cache miss for {}", domain),
            Err(e) => warn!("Domain cache read failed for {}: {}", domain, e),
        }

        let (resolvable, ttl) = match self.resolver.resolve(&domain).await {
            Ok(resolvable) => (resolvable, self.ttl),
            Err(e) => {
                warn!("Treating {} as unresolvable after transient failure: {}", domain, e);
                (false, self.transient_ttl)
            }
        };

        if let Err(e) = self.cache.put(&domain, resolvable, ttl).await {
            warn!("Domain cache write failed for {}: {}", domain, e);
        }

        resolvable
    }
}

/// Lower-cases a domain and drops a trailing root dot.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_lowercase()
}
