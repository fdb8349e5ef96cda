//! Externally sourced disposable-domain blocklist.
//!
//! The active [`BlocklistSnapshot`] is an immutable set swapped wholesale on
//! every successful refresh. A failed refresh leaves the previous snapshot in
//! place, so readers keep being served the last good data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::disposable::parent_domains;

#[derive(Debug, Error)]
pub enum BlocklistError {
    #[error("failed to fetch disposable domains: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch disposable domains, status code: {0}")]
    Status(u16),

    #[error("malformed disposable domain list: {0}")]
    Malformed(&'static str),
}

/// Where the newline-delimited domain list comes from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlocklistSource: Send + Sync {
    async fn fetch(&self) -> Result<String, BlocklistError>;
}

/// Fetches the list over HTTP(S) with a bounded timeout.
pub struct HttpBlocklistSource {
    client: reqwest::Client,
    url: String,
}

impl HttpBlocklistSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, BlocklistError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("email-validator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl BlocklistSource for HttpBlocklistSource {
    async fn fetch(&self) -> Result<String, BlocklistError> {
        debug!("Fetching disposable domains from {}", self.url);
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BlocklistError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        String::from_utf8(body.to_vec()).map_err(|_| BlocklistError::Malformed("body is not UTF-8"))
    }
}

/// Point-in-time copy of the disposable-domain set.
#[derive(Debug)]
pub struct BlocklistSnapshot {
    domains: HashSet<String>,
    loaded_at: DateTime<Utc>,
}

impl BlocklistSnapshot {
    /// Parses the wire format: one domain per line, blank lines and lines
    /// starting with `#` ignored, domains lower-cased.
    pub fn parse(body: &str) -> Result<Self, BlocklistError> {
        let domains: HashSet<String> = body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        if domains.is_empty() {
            return Err(BlocklistError::Malformed("no domains found"));
        }
        if domains.iter().any(|domain| domain.contains(char::is_whitespace)) {
            return Err(BlocklistError::Malformed("entry contains whitespace"));
        }

        Ok(Self {
            domains,
            loaded_at: Utc::now(),
        })
    }

    pub fn contains(&self, domain: &str) -> bool {
        parent_domains(domain).any(|candidate| self.domains.contains(candidate))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// What a call to [`DisposableBlocklist::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot with this many domains is now active.
    Published(usize),
    /// The fetch failed; the previous snapshot (if any) is still active.
    Failed,
    /// Another refresh was already in flight.
    Skipped,
}

pub struct DisposableBlocklist {
    source: Arc<dyn BlocklistSource>,
    active: RwLock<Option<Arc<BlocklistSnapshot>>>,
    refreshing: Mutex<()>,
}

impl DisposableBlocklist {
    pub fn new(source: Arc<dyn BlocklistSource>) -> Self {
        Self {
            source,
            active: RwLock::new(None),
            refreshing: Mutex::new(()),
        }
    }

    /// Populates the first snapshot. Returns immediately once a snapshot
    /// exists; a failure never discards one.
    pub async fn load(&self) -> Result<(), BlocklistError> {
        if self.snapshot().is_some() {
            return Ok(());
        }

        let _guard = self.refreshing.lock().await;
        if self.snapshot().is_some() {
            return Ok(());
        }

        info!("Loading disposable email domain blocklist...");
        self.fetch_and_publish().await.map(|_| ())
    }

    /// Fetches, parses and publishes a new snapshot. Errors are logged and
    /// leave the active snapshot untouched. Concurrent calls are collapsed:
    /// while one refresh is in flight, others return [`RefreshOutcome::Skipped`].
    pub async fn refresh(&self) -> RefreshOutcome {
        let Ok(_guard) = self.refreshing.try_lock() else {
            debug!("Blocklist refresh already in flight, skipping");
            return RefreshOutcome::Skipped;
        };

        match self.fetch_and_publish().await {
            Ok(count) => RefreshOutcome::Published(count),
            Err(e) => {
                warn!("Blocklist refresh failed, keeping previous snapshot: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    /// `false` when no snapshot has been loaded yet.
    pub fn is_disposable(&self, domain: &str) -> bool {
        self.snapshot()
            .is_some_and(|snapshot| snapshot.contains(&domain.to_lowercase()))
    }

    /// The active snapshot, if one has been loaded.
    pub fn snapshot(&self) -> Option<Arc<BlocklistSnapshot>> {
        self.active.read().clone()
    }

    async fn fetch_and_publish(&self) -> Result<usize, BlocklistError> {
        let body = self.source.fetch().await?;
        let snapshot = BlocklistSnapshot::parse(&body)?;
        let count = snapshot.len();

        *self.active.write() = Some(Arc::new(snapshot));
        info!("Successfully loaded {} disposable email domains.", count);
        Ok(count)
    }
}

/// Background task that refreshes a [`DisposableBlocklist`] on a fixed
/// interval until shut down.
pub struct RefreshScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Spawns the refresh loop. The first refresh fires one `interval` after
    /// spawning; the initial load is the caller's job.
    pub fn spawn(blocklist: Arc<DisposableBlocklist>, interval: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = stop.changed() => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            _ = stop.changed() => break,
                            outcome = blocklist.refresh() => {
                                debug!("Scheduled blocklist refresh finished: {:?}", outcome)
                            }
                        }
                    }
                }
            }

            debug!("Blocklist refresh scheduler stopped");
        });

        Self { shutdown, handle }
    }

    /// Stops the loop, abandoning any in-flight fetch, and waits for the task
    /// to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!("Blocklist refresh task ended abnormally: {}", e);
        }
    }
}

#[cfg(test)]
#[path = "blocklist_test.rs"]
mod tests;
