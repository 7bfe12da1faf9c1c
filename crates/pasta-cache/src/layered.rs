use async_trait::async_trait;
use pasta_core::cache::Result;
use pasta_core::{Paste, PasteCache, PasteId};
use tracing::{debug, trace};

/// A two-level cache composed of a fast local L1 and a shared L2.
///
/// - **Get**: try L1, then L2. An L2 hit is copied back into L1.
/// - **Set**: write L2 first, then L1.
/// - **Delete**: remove from L1, then L2.
///
/// ```rust
/// use pasta_cache::{LayeredCache, MokaPasteCache};
///
/// let l1 = MokaPasteCache::with_capacity(1_000);
/// let l2 = MokaPasteCache::with_capacity(10_000);
/// let _cache = LayeredCache::new(l1, l2);
/// ```
#[derive(Debug, Clone)]
pub struct LayeredCache<L1, L2> {
    l1: L1,
    l2: L2,
}

impl<L1, L2> LayeredCache<L1, L2> {
    pub fn new(l1: L1, l2: L2) -> Self {
        Self { l1, l2 }
    }

    pub fn l1(&self) -> &L1 {
        &self.l1
    }

    pub fn l2(&self) -> &L2 {
        &self.l2
    }

    /// Consumes the layered cache and returns the inner caches.
    pub fn into_inner(self) -> (L1, L2) {
        (self.l1, self.l2)
    }
}

#[async_trait]
impl<L1, L2> PasteCache for LayeredCache<L1, L2>
where
    L1: PasteCache,
    L2: PasteCache,
{
    async fn get_paste(&self, id: &PasteId) -> Result<Option<Paste>> {
        if let Some(paste) = self.l1.get_paste(id).await? {
            debug!(id = %id, "l1 cache hit");
            return Ok(Some(paste));
        }

        match self.l2.get_paste(id).await? {
            Some(paste) => {
                debug!(id = %id, "l2 cache hit, backfilling l1");
                self.l1.set_paste(id, &paste).await?;
                Ok(Some(paste))
            }
            None => {
                trace!(id = %id, "l1 and l2 cache miss");
                Ok(None)
            }
        }
    }

    async fn set_paste(&self, id: &PasteId, paste: &Paste) -> Result<()> {
        self.l2.set_paste(id, paste).await?;
        self.l1.set_paste(id, paste).await
    }

    async fn del(&self, id: &PasteId) -> Result<()> {
        // L1 goes first so this node stops serving the entry even if L2 fails.
        self.l1.del(id).await?;
        self.l2.del(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MokaPasteCache;
    use jiff::Timestamp;

    fn id(s: &str) -> PasteId {
        PasteId::new_unchecked(s)
    }

    fn paste(key: &str) -> Paste {
        Paste {
            id: id(key),
            timestamp: Timestamp::now(),
            content: "fn main() {}".to_string(),
            email: "dev@example.com".to_string(),
            title: Some("hello".to_string()),
            language: Some("rust".to_string()),
        }
    }

    fn create_test_cache() -> LayeredCache<MokaPasteCache, MokaPasteCache> {
        LayeredCache::new(
            MokaPasteCache::with_capacity(100),
            MokaPasteCache::with_capacity(100),
        )
    }

    #[tokio::test]
    async fn get_from_l1() {
        let cache = create_test_cache();
        let p = paste("abc123");
        cache.l1().set_paste(&p.id, &p).await.unwrap();

        assert_eq!(cache.get_paste(&p.id).await.unwrap(), Some(p));
    }

    #[tokio::test]
    async fn get_backfills_l1_from_l2() {
        let cache = create_test_cache();
        let p = paste("abc123");
        cache.l2().set_paste(&p.id, &p).await.unwrap();
        assert!(cache.l1().get_paste(&p.id).await.unwrap().is_none());

        assert_eq!(cache.get_paste(&p.id).await.unwrap(), Some(p.clone()));
        assert_eq!(cache.l1().get_paste(&p.id).await.unwrap(), Some(p));
    }

    #[tokio::test]
    async fn set_writes_to_both() {
        let cache = create_test_cache();
        let p = paste("abc123");

        cache.set_paste(&p.id, &p).await.unwrap();

        assert_eq!(cache.l1().get_paste(&p.id).await.unwrap(), Some(p.clone()));
        assert_eq!(cache.l2().get_paste(&p.id).await.unwrap(), Some(p));
    }

    #[tokio::test]
    async fn del_removes_from_both() {
        let cache = create_test_cache();
        let p = paste("abc123");
        cache.set_paste(&p.id, &p).await.unwrap();

        cache.del(&p.id).await.unwrap();

        assert!(cache.l1().get_paste(&p.id).await.unwrap().is_none());
        assert!(cache.l2().get_paste(&p.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn miss_when_both_empty() {
        let cache = create_test_cache();

        assert!(cache.get_paste(&id("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn into_inner_returns_working_caches() {
        let (l1, _l2) = create_test_cache().into_inner();
        let p = paste("abc123");

        l1.set_paste(&p.id, &p).await.unwrap();
        assert_eq!(l1.get_paste(&p.id).await.unwrap(), Some(p));
    }
}
