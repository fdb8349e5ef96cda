//! Domain resolvability cache.
//!
//! Two backends sit behind [`DomainCache`]: an in-process [`MemoryDomainCache`]
//! and a shared [`RedisDomainCache`]. Entries are replaced wholesale on every
//! write and expire a fixed TTL after they were written.

use async_trait::async_trait;
use dashmap::DashMap;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tokio::time::Instant;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Backend(#[from] redis::RedisError),
}

/// Key/value store mapping a domain to its last known resolvability verdict.
///
/// Callers pass normalized (lower-cased) domain names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainCache: Send + Sync {
    /// Returns the cached verdict, or `None` when absent or expired.
    async fn get(&self, domain: &str) -> Result<Option<bool>, CacheError>;

    /// Stores a verdict that expires `ttl` from now.
    async fn put(&self, domain: &str, resolvable: bool, ttl: Duration) -> Result<(), CacheError>;
}

#[derive(Debug, Clone, Copy)]
struct DomainCacheEntry {
    resolvable: bool,
    expires_at: Instant,
}

/// In-process cache backed by a concurrent map.
///
/// Expired entries are dropped lazily on read; there is no size bound beyond
/// the TTL window.
#[derive(Debug, Default)]
pub struct MemoryDomainCache {
    entries: DashMap<String, DomainCacheEntry>,
}

impl MemoryDomainCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl DomainCache for MemoryDomainCache {
    async fn get(&self, domain: &str) -> Result<Option<bool>, CacheError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(domain) {
            if entry.expires_at > now {
                return Ok(Some(entry.resolvable));
            }
        }

        self.entries
            .remove_if(domain, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn put(&self, domain: &str, resolvable: bool, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            domain.to_string(),
            DomainCacheEntry {
                resolvable,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

/// Redis-backed cache shared between service instances.
///
/// One [`ConnectionManager`] is opened on first use and reused afterwards;
/// it reconnects on its own when the connection drops.
pub struct RedisDomainCache {
    client: Client,
    connection: OnceCell<ConnectionManager>,
}

impl RedisDomainCache {
    /// Validates the URL without connecting.
    pub fn new(redis_url: &str) -> Result<Self, CacheError> {
        Ok(Self {
            client: Client::open(redis_url)?,
            connection: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let manager = self
            .connection
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(manager.clone())
    }

    fn key(domain: &str) -> String {
        format!("dns_mx::{}", domain)
    }
}

#[async_trait]
impl DomainCache for RedisDomainCache {
    async fn get(&self, domain: &str) -> Result<Option<bool>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(Self::key(domain)).await?;
        Ok(value.map(|val| val == "valid"))
    }

    async fn put(&self, domain: &str, resolvable: bool, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let value = if resolvable { "valid" } else { "invalid" };
        let _: () = conn
            .set_ex(Self::key(domain), value, ttl.as_secs().max(1))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_on_empty_cache_misses() {
        let cache = MemoryDomainCache::new();
        assert_eq!(cache.get("example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get_returns_verdict() {
        let cache = MemoryDomainCache::new();
        cache
            .put("example.com", true, Duration::from_secs(600))
            .await
            .unwrap();
        cache
            .put("nowhere.invalid", false, Duration::from_secs(600))
            .await
            .unwrap();

        assert_eq!(cache.get("example.com").await.unwrap(), Some(true));
        assert_eq!(cache.get("nowhere.invalid").await.unwrap(), Some(false));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryDomainCache::new();
        cache
            .put("example.com", true, Duration::from_secs(600))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(599)).await;
        assert_eq!(cache.get("example.com").await.unwrap(), Some(true));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("example.com").await.unwrap(), None);
        assert!(cache.is_empty(), "expired entry should be dropped on read");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewrite_replaces_entry_and_ttl() {
        let cache = MemoryDomainCache::new();
        cache
            .put("flaky.example", false, Duration::from_secs(30))
            .await
            .unwrap();
        cache
            .put("flaky.example", true, Duration::from_secs(600))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.get("flaky.example").await.unwrap(), Some(true));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_redis_cache_rejects_invalid_url() {
        assert!(RedisDomainCache::new("invalid-url").is_err());
    }

    #[test]
    fn test_redis_cache_connects_lazily() {
        let cache = RedisDomainCache::new("redis://127.0.0.1:1/").unwrap();
        assert!(cache.connection.get().is_none());
    }

    #[tokio::test]
    #[ignore = "Requires a running Redis server"]
    async fn test_redis_cache_reuses_connection() {
        let cache = RedisDomainCache::new("redis://127.0.0.1:6379/").unwrap();
        cache
            .put("example.com", true, Duration::from_secs(60))
            .await
            .unwrap();
        assert!(cache.connection.get().is_some());

        assert_eq!(cache.get("example.com").await.unwrap(), Some(true));
        assert_eq!(cache.get("nowhere.example").await.unwrap(), None);
    }

    #[test]
    fn test_redis_key_format() {
        assert_eq!(RedisDomainCache::key("example.com"), "dns_mx::example.com");
    }
}
