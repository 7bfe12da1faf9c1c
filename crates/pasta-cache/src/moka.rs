use async_trait::async_trait;
use moka::future::Cache;
use pasta_core::cache::Result;
use pasta_core::{Paste, PasteCache, PasteId};
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Default maximum number of cached pastes.
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// Default lifetime of a cached paste.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// An in-process paste cache backed by Moka.
///
/// Suitable for single-node deployments, or as the L1 in front of Redis.
/// Entries expire after their time-to-live and are evicted once the
/// capacity is reached.
#[derive(Debug, Clone)]
pub struct MokaPasteCache {
    cache: Cache<String, Paste>,
}

impl MokaPasteCache {
    /// Creates a cache with [`DEFAULT_CAPACITY`] and [`DEFAULT_TTL`].
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CAPACITY, DEFAULT_TTL)
    }

    /// Creates a cache with a custom capacity and the default TTL.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self::with_ttl(max_capacity, DEFAULT_TTL)
    }

    /// Creates a cache with a custom capacity and time-to-live.
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> MokaCacheConfigBuilder {
        MokaCacheConfig::builder()
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Flushes Moka's pending maintenance work.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for MokaPasteCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteCache for MokaPasteCache {
    async fn get_paste(&self, id: &PasteId) -> Result<Option<Paste>> {
        match self.cache.get(id.as_str()).await {
            Some(paste) => {
                debug!(id = %id, "cache hit in moka");
                Ok(Some(paste))
            }
            None => {
                trace!(id = %id, "cache miss in moka");
                Ok(None)
            }
        }
    }

    async fn set_paste(&self, id: &PasteId, paste: &Paste) -> Result<()> {
        self.cache
            .insert(id.as_str().to_owned(), paste.clone())
            .await;
        trace!(id = %id, "cached paste in moka");
        Ok(())
    }

    async fn del(&self, id: &PasteId) -> Result<()> {
        self.cache.invalidate(id.as_str()).await;
        trace!(id = %id, "removed paste from moka (if present)");
        Ok(())
    }
}

/// Configuration for a [`MokaPasteCache`].
#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = MokaPasteCache))]
pub struct MokaCacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default = DEFAULT_CAPACITY)]
    max_capacity: u64,
    /// Time-to-live for cache entries.
    #[builder(default = DEFAULT_TTL)]
    ttl: Duration,
    /// Time-to-idle for cache entries.
    #[builder(default, setter(strip_option))]
    tti: Option<Duration>,
}

impl From<MokaCacheConfig> for MokaPasteCache {
    fn from(config: MokaCacheConfig) -> Self {
        let mut builder = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.ttl);

        if let Some(tti) = config.tti {
            builder = builder.time_to_idle(tti);
        }

        MokaPasteCache {
            cache: builder.build(),
        }
    }
}
