use crate::error::CacheError;
use crate::paste::Paste;
use crate::paste_id::PasteId;
use async_trait::async_trait;

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// A best-effort cache of pastes keyed by [`PasteId`].
///
/// The cache is never the system of record. Expiry and eviction are the
/// implementation's own concern; callers only observe hits and misses.
#[async_trait]
pub trait PasteCache: Send + Sync + 'static {
    /// Get a paste from the cache.
    ///
    /// Returns `Ok(None)` on a miss.
    async fn get_paste(&self, id: &PasteId) -> Result<Option<Paste>>;

    /// Store a paste in the cache.
    async fn set_paste(&self, id: &PasteId, paste: &Paste) -> Result<()>;

    /// Remove a paste from the cache.
    ///
    /// It is not an error if the key does not exist.
    async fn del(&self, id: &PasteId) -> Result<()>;
}
