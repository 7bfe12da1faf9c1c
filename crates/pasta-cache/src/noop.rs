use async_trait::async_trait;
use pasta_core::cache::Result;
use pasta_core::{Paste, PasteCache, PasteId};

/// A cache that stores nothing. Every lookup is a miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

#[async_trait]
impl PasteCache for NoopCache {
    async fn get_paste(&self, _id: &PasteId) -> Result<Option<Paste>> {
        Ok(None)
    }

    async fn set_paste(&self, _id: &PasteId, _paste: &Paste) -> Result<()> {
        Ok(())
    }

    async fn del(&self, _id: &PasteId) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    #[tokio::test]
    async fn never_returns_stored_values() {
        let cache = NoopCache;
        let p = Paste {
            id: PasteId::new_unchecked("abc"),
            timestamp: Timestamp::now(),
            content: "x".to_string(),
            email: "a@b.c".to_string(),
            title: None,
            language: None,
        };

        cache.set_paste(&p.id, &p).await.unwrap();

        assert!(cache.get_paste(&p.id).await.unwrap().is_none());
        cache.del(&p.id).await.unwrap();
    }
}
