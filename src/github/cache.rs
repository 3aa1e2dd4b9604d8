use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for GitHub response caching
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool, // false when --no-cache
    pub ttl: Duration,
}

/// Get the platform-appropriate cache directory for repolens
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("repolens/http-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/repolens/http-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

/// Clear the response cache directory
pub fn clear_cache() -> Result<()> {
    clear_cache_at(&get_cache_path())
}

fn clear_cache_at(cache_path: &std::path::Path) -> Result<()> {
    match std::fs::remove_dir_all(cache_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("Failed to remove cache directory"),
    }
}

/// Serializable cache entry: the raw JSON body plus when it was fetched
#[derive(Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: i64, // Unix timestamp
    body: serde_json::Value,
}

/// Disk cache of GitHub API JSON responses, keyed by route.
///
/// Backed by cacache. Entries older than the TTL are ignored. Read and write
/// failures are treated as misses and never surface to callers.
#[derive(Clone, Debug)]
pub struct ResponseCache {
    cache_path: PathBuf,
    config: CacheConfig,
}

impl ResponseCache {
    pub fn new(cache_path: PathBuf, config: CacheConfig) -> Self {
        Self { cache_path, config }
    }

    /// Load a fresh cached response and deserialize it
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.config.enabled {
            return None;
        }

        let bytes = cacache::read_sync(&self.cache_path, key).ok()?;
        let entry: CacheEntry = serde_json::from_slice(&bytes).ok()?;

        if !is_fresh(entry.fetched_at, Utc::now().timestamp(), self.config.ttl) {
            tracing::debug!(key, "cache entry expired");
            return None;
        }

        serde_json::from_value(entry.body).ok()
    }

    /// Store a response body (fire-and-forget, disk errors are ignored)
    pub fn put(&self, key: &str, body: &serde_json::Value) {
        if !self.config.enabled {
            return;
        }

        let entry = CacheEntry {
            fetched_at: Utc::now().timestamp(),
            body: body.clone(),
        };
        if let Ok(serialized) = serde_json::to_vec(&entry) {
            if let Err(e) = cacache::write_sync(&self.cache_path, key, &serialized) {
                tracing::debug!(key, error = %e, "cache write failed");
            }
        }
    }
}

fn is_fresh(fetched_at: i64, now: i64, ttl: Duration) -> bool {
    let age = now - fetched_at;
    age >= 0 && (age as u64) < ttl.as_secs()
}
