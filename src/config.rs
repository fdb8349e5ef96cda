//! Environment-driven service configuration.
//!
//! Values are read once at startup. A `.env` file is honoured when present.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BLOCKLIST_URL: &str = "https://raw.githubusercontent.com/disposable-email-domains/disposable-email-domains/refs/heads/main/disposable_email_blocklist.conf";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Redis connection URL for the domain cache. In-memory cache when unset.
    pub redis_url: Option<String>,
    pub domain_cache_ttl: Duration,
    /// TTL for negative verdicts caused by timeouts or resolver errors.
    pub transient_cache_ttl: Duration,
    pub dns_timeout: Duration,
    pub blocklist_url: String,
    pub blocklist_refresh_interval: Duration,
    pub blocklist_fetch_timeout: Duration,
    pub batch_concurrency: usize,
    pub batch_max_size: usize,
    pub api_keys: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            redis_url: None,
            domain_cache_ttl: Duration::from_secs(600),
            transient_cache_ttl: Duration::from_secs(30),
            dns_timeout: Duration::from_millis(3000),
            blocklist_url: DEFAULT_BLOCKLIST_URL.to_string(),
            blocklist_refresh_interval: Duration::from_secs(24 * 60 * 60),
            blocklist_fetch_timeout: Duration::from_secs(10),
            batch_concurrency: 16,
            batch_max_size: 100,
            api_keys: Vec::new(),
        }
    }
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup. Unset or blank
    /// keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let config = Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse(&get, "PORT", defaults.port)?,
            redis_url: get("REDIS_URL"),
            domain_cache_ttl: Duration::from_secs(parse(
                &get,
                "DOMAIN_CACHE_TTL_SECS",
                defaults.domain_cache_ttl.as_secs(),
            )?),
            transient_cache_ttl: Duration::from_secs(parse(
                &get,
                "DOMAIN_CACHE_TRANSIENT_TTL_SECS",
                defaults.transient_cache_ttl.as_secs(),
            )?),
            dns_timeout: Duration::from_millis(parse(
                &get,
                "DNS_TIMEOUT_MS",
                defaults.dns_timeout.as_millis() as u64,
            )?),
            blocklist_url: get("DISPOSABLE_BLOCKLIST_URL").unwrap_or(defaults.blocklist_url),
            blocklist_refresh_interval: Duration::from_secs(parse(
                &get,
                "BLOCKLIST_REFRESH_INTERVAL_SECS",
                defaults.blocklist_refresh_interval.as_secs(),
            )?),
            blocklist_fetch_timeout: Duration::from_secs(parse(
                &get,
                "BLOCKLIST_FETCH_TIMEOUT_SECS",
                defaults.blocklist_fetch_timeout.as_secs(),
            )?),
            batch_concurrency: parse(&get, "BATCH_CONCURRENCY", defaults.batch_concurrency)?,
            batch_max_size: parse(&get, "BATCH_MAX_SIZE", defaults.batch_max_size)?,
            api_keys: get("API_KEYS")
                .map(|keys| {
                    keys.split(',')
                        .map(str::trim)
                        .filter(|key| !key.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };

        if config.batch_concurrency == 0 {
            return Err(ConfigError::Zero {
                key: "BATCH_CONCURRENCY",
            });
        }
        if config.blocklist_refresh_interval.is_zero() {
            return Err(ConfigError::Zero {
                key: "BLOCKLIST_REFRESH_INTERVAL_SECS",
            });
        }
        if config.dns_timeout.is_zero() {
            return Err(ConfigError::Zero {
                key: "DNS_TIMEOUT_MS",
            });
        }

        Ok(config)
    }
}

fn parse<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}
