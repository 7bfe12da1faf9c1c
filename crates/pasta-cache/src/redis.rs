use async_trait::async_trait;
use pasta_core::cache::Result;
use pasta_core::{CacheError, Paste, PasteCache, PasteId};
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Key prefix used unless one is given explicitly.
pub const DEFAULT_KEY_PREFIX: &str = "pasta:paste:";

/// A Redis-backed [`PasteCache`].
///
/// Pastes are stored as JSON strings under `{prefix}{id}` and written with
/// `SET .. EX` so Redis expires them on its own.
#[derive(Clone)]
pub struct RedisPasteCache {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
    ttl: Duration,
}

impl std::fmt::Debug for RedisPasteCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPasteCache")
            .field("key_prefix", &self.key_prefix)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        CacheError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
        CacheError::Unavailable(message)
    } else {
        CacheError::Operation(message)
    }
}

impl RedisPasteCache {
    /// Creates a cache with [`DEFAULT_KEY_PREFIX`] and the given TTL.
    pub fn new(conn: redis::aio::MultiplexedConnection, ttl: Duration) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX, ttl)
    }

    /// Creates a cache with a custom key prefix (e.g. "myapp:paste:").
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            ttl,
        }
    }

    /// Opens a multiplexed connection to `redis_url` and wraps it.
    pub async fn connect(redis_url: &str, ttl: Duration) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| map_redis_error("invalid redis url", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| map_redis_error("failed to connect to redis", e))?;
        Ok(Self::new(conn, ttl))
    }

    fn cache_key(&self, id: &PasteId) -> String {
        format!("{}{}", self.key_prefix, id.as_str())
    }

    // SET EX rejects zero, so round sub-second TTLs up.
    fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs().max(1)
    }
}

#[async_trait]
impl PasteCache for RedisPasteCache {
    async fn get_paste(&self, id: &PasteId) -> Result<Option<Paste>> {
        let key = self.cache_key(id);

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(cached)) => {
                debug!(id = %id, "cache hit in redis");
                serde_json::from_str::<Paste>(&cached).map(Some).map_err(|e| {
                    warn!(id = %id, error = %e, "failed to deserialize cached paste");
                    CacheError::InvalidData(format!("invalid cached value for key '{key}': {e}"))
                })
            }
            Ok(None) => {
                trace!(id = %id, "cache miss in redis");
                Ok(None)
            }
            Err(e) => Err(map_redis_error("failed to fetch value from redis", e)),
        }
    }

    async fn set_paste(&self, id: &PasteId, paste: &Paste) -> Result<()> {
        let key = self.cache_key(id);
        let json = serde_json::to_string(paste)
            .map_err(|e| CacheError::Serialization(format!("failed to serialize paste: {e}")))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(&key, json, self.ttl_secs())
            .await
            .map_err(|e| map_redis_error("failed to write value to redis", e))?;

        trace!(id = %id, ttl_secs = self.ttl_secs(), "cached paste in redis");
        Ok(())
    }

    async fn del(&self, id: &PasteId) -> Result<()> {
        let key = self.cache_key(id);

        let mut conn = self.conn.clone();
        conn.del::<_, ()>(&key)
            .await
            .map_err(|e| map_redis_error("failed to delete value from redis", e))?;

        trace!(id = %id, "removed paste from redis");
        Ok(())
    }
}
