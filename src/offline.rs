//! Versioned asset cache for the browser shell
//!
//! Mirrors what an offline worker does for the app shell: pre-load a fixed
//! asset list on install, drop buckets of older versions on activate, and
//! answer fetches cache-first. Nothing in the order pipeline depends on it.
//!
//! ```text
//! fetch(path) ──▶ current bucket ──hit──▶ Cache
//!                      │miss
//!                      ▼
//!                 AssetSource ──ok──▶ Source
//!                      │err
//!                      ▼
//!                 cached "/" ──hit──▶ Fallback
//!                      │miss
//!                      ▼
//!                 AssetError::Unavailable
//! ```

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Cache version name; bumping it purges older buckets on activate
pub const DEFAULT_CACHE_NAME: &str = "suitcut-cache-v2";

/// Assets pre-loaded on install
pub const DEFAULT_ASSETS: [&str; 5] = [
    "/",
    "/index.html",
    "/manifest.webmanifest",
    "/icon-192.png",
    "/icon-512.png",
];

const ROOT: &str = "/";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{0}' not found")]
    NotFound(String),

    #[error("asset '{path}' unavailable: {message}")]
    Unavailable { path: String, message: String },

    #[error("asset cache lock poisoned")]
    LockPoisoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub content_type: String,
    pub body: Vec<u8>,
}

impl Asset {
    pub fn new(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            body: body.into(),
        }
    }
}

/// Where assets come from when the cache misses
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Asset, AssetError>;
}

/// Fixed in-memory asset set
#[derive(Debug, Clone, Default)]
pub struct StaticAssetSource {
    assets: HashMap<String, Asset>,
}

impl StaticAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, path: impl Into<String>, asset: Asset) -> Self {
        self.assets.insert(path.into(), asset);
        self
    }

    /// Minimal app shell covering [`DEFAULT_ASSETS`]
    pub fn shell() -> Self {
        const INDEX: &str = "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Suitcut</title>\n<link rel=\"manifest\" href=\"/manifest.webmanifest\">\n</head>\n<body>\n<div id=\"root\"></div>\n</body>\n</html>\n";
        const MANIFEST: &str = r#"{"name":"Suitcut","short_name":"Suitcut","start_url":"/","display":"standalone","icons":[{"src":"/icon-192.png","sizes":"192x192","type":"image/png"},{"src":"/icon-512.png","sizes":"512x512","type":"image/png"}]}"#;
        // 1x1 transparent PNG used for both icon sizes
        const ICON: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

        let icon = STANDARD.decode(ICON).unwrap_or_default();
        Self::new()
            .with_asset("/", Asset::new("text/html; charset=utf-8", INDEX))
            .with_asset("/index.html", Asset::new("text/html; charset=utf-8", INDEX))
            .with_asset(
                "/manifest.webmanifest",
                Asset::new("application/manifest+json", MANIFEST),
            )
            .with_asset("/icon-192.png", Asset::new("image/png", icon.clone()))
            .with_asset("/icon-512.png", Asset::new("image/png", icon))
    }
}

#[async_trait]
impl AssetSource for StaticAssetSource {
    async fn fetch(&self, path: &str) -> Result<Asset, AssetError> {
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

type Buckets = HashMap<String, HashMap<String, Asset>>;

/// Named buckets shared by every cache version
#[derive(Debug, Clone, Default)]
pub struct CacheStorage {
    buckets: Arc<RwLock<Buckets>>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket_names(&self) -> Result<Vec<String>, AssetError> {
        let buckets = self.buckets.read().map_err(|_| AssetError::LockPoisoned)?;
        let mut names: Vec<String> = buckets.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn lookup(&self, bucket: &str, path: &str) -> Result<Option<Asset>, AssetError> {
        let buckets = self.buckets.read().map_err(|_| AssetError::LockPoisoned)?;
        Ok(buckets.get(bucket).and_then(|b| b.get(path)).cloned())
    }
}

/// How a fetch was answered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
    Cache,
    Source,
    /// The source failed and the cached root document was served instead
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub asset: Asset,
    pub origin: AssetOrigin,
}

/// One version of the asset cache
#[derive(Debug, Clone)]
pub struct AssetCache {
    storage: CacheStorage,
    name: String,
    assets: Vec<String>,
}

impl AssetCache {
    pub fn new(storage: CacheStorage, name: impl Into<String>, assets: Vec<String>) -> Self {
        Self {
            storage,
            name: name.into(),
            assets,
        }
    }

    /// Current version with the default asset list
    pub fn current(storage: CacheStorage) -> Self {
        Self::new(
            storage,
            DEFAULT_CACHE_NAME,
            DEFAULT_ASSETS.iter().map(|a| a.to_string()).collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pre-load every asset into this version's bucket
    ///
    /// Either all assets are stored or none are.
    pub async fn install(&self, source: &dyn AssetSource) -> Result<(), AssetError> {
        let mut loaded = HashMap::with_capacity(self.assets.len());
        for path in &self.assets {
            let asset = source.fetch(path).await?;
            loaded.insert(path.clone(), asset);
        }

        let count = loaded.len();
        {
            let mut buckets = self
                .storage
                .buckets
                .write()
                .map_err(|_| AssetError::LockPoisoned)?;
            buckets.entry(self.name.clone()).or_default().extend(loaded);
        }
        tracing::info!(cache = %self.name, assets = count, "asset cache installed");
        Ok(())
    }

    /// Drop every bucket that belongs to another version
    pub fn activate(&self) -> Result<Vec<String>, AssetError> {
        let mut buckets = self
            .storage
            .buckets
            .write()
            .map_err(|_| AssetError::LockPoisoned)?;
        let stale: Vec<String> = buckets
            .keys()
            .filter(|name| **name != self.name)
            .cloned()
            .collect();
        for name in &stale {
            buckets.remove(name);
            tracing::info!(cache = %name, "stale asset cache purged");
        }
        Ok(stale)
    }

    /// Answer a request cache-first
    pub async fn fetch(&self, path: &str, source: &dyn AssetSource) -> Result<Fetched, AssetError> {
        if let Some(asset) = self.storage.lookup(&self.name, path)? {
            return Ok(Fetched {
                asset,
                origin: AssetOrigin::Cache,
            });
        }

        match source.fetch(path).await {
            Ok(asset) => Ok(Fetched {
                asset,
                origin: AssetOrigin::Source,
            }),
            Err(err) => {
                tracing::debug!(path, error = %err, "asset source failed, trying cached root");
                match self.storage.lookup(&self.name, ROOT)? {
                    Some(asset) => Ok(Fetched {
                        asset,
                        origin: AssetOrigin::Fallback,
                    }),
                    None => Err(AssetError::Unavailable {
                        path: path.to_string(),
                        message: err.to_string(),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that fails for every request
    struct Offline;

    #[async_trait]
    impl AssetSource for Offline {
        async fn fetch(&self, path: &str) -> Result<Asset, AssetError> {
            Err(AssetError::Unavailable {
                path: path.to_string(),
                message: "offline".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_install_then_serve_from_cache() {
        let cache = AssetCache::current(CacheStorage::new());
        cache.install(&StaticAssetSource::shell()).await.unwrap();

        let fetched = cache.fetch("/manifest.webmanifest", &Offline).await.unwrap();
        assert_eq!(fetched.origin, AssetOrigin::Cache);
        assert_eq!(fetched.asset.content_type, "application/manifest+json");
    }

    #[tokio::test]
    async fn test_install_is_all_or_nothing() {
        let storage = CacheStorage::new();
        let cache = AssetCache::current(storage.clone());
        let partial = StaticAssetSource::new().with_asset("/", Asset::new("text/html", "x"));

        assert!(cache.install(&partial).await.is_err());
        assert!(storage.bucket_names().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_miss_goes_to_source() {
        let cache = AssetCache::current(CacheStorage::new());
        cache.install(&StaticAssetSource::shell()).await.unwrap();

        let source =
            StaticAssetSource::new().with_asset("/app.js", Asset::new("text/javascript", "1"));
        let fetched = cache.fetch("/app.js", &source).await.unwrap();
        assert_eq!(fetched.origin, AssetOrigin::Source);
    }

    #[tokio::test]
    async fn test_source_failure_falls_back_to_root() {
        let cache = AssetCache::current(CacheStorage::new());
        cache.install(&StaticAssetSource::shell()).await.unwrap();

        let fetched = cache.fetch("/orders/42", &Offline).await.unwrap();
        assert_eq!(fetched.origin, AssetOrigin::Fallback);
        assert!(fetched.asset.content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_source_failure_without_cached_root_errors() {
        let cache = AssetCache::current(CacheStorage::new());
        let result = cache.fetch("/orders/42", &Offline).await;
        assert!(matches!(result, Err(AssetError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_activate_purges_other_versions() {
        let storage = CacheStorage::new();
        let old = AssetCache::new(storage.clone(), "suitcut-cache-v1", vec!["/".to_string()]);
        old.install(&StaticAssetSource::shell()).await.unwrap();

        let current = AssetCache::current(storage.clone());
        current.install(&StaticAssetSource::shell()).await.unwrap();
        assert_eq!(storage.bucket_names().unwrap().len(), 2);

        let purged = current.activate().unwrap();
        assert_eq!(purged, vec!["suitcut-cache-v1".to_string()]);
        assert_eq!(
            storage.bucket_names().unwrap(),
            vec![DEFAULT_CACHE_NAME.to_string()]
        );
    }
}
