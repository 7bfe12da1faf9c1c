use crate::config::{ServiceConfig, MAX_LANGUAGE_CHARS, MAX_TITLE_CHARS};
use async_trait::async_trait;
use jiff::Timestamp;
use pasta_core::cache::Result as CacheResult;
use pasta_core::error::Result as StorageResult;
use pasta_core::{
    Identity, NewPaste, Paste, PasteCache, PasteId, PasteSummary, Pastebin, Repository,
    ServiceError, StorageError,
};
use pasta_generator::Generator;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// The concrete [`Pastebin`].
///
/// Wraps a [`Repository`] (the system of record), a [`PasteCache`] and an
/// id [`Generator`]:
/// - reads go through the cache and fall back to the repository;
/// - cache failures are logged and otherwise ignored;
/// - id collisions on insert are retried with a fresh id.
pub struct PasteService<R, C, G> {
    repository: Arc<R>,
    cache: Arc<C>,
    generator: Arc<G>,
    config: ServiceConfig,
}

impl<R, C, G> Clone for PasteService<R, C, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            generator: Arc::clone(&self.generator),
            config: self.config.clone(),
        }
    }
}

impl<R: Repository, C: PasteCache, G: Generator> PasteService<R, C, G> {
    /// Creates a service with the default [`ServiceConfig`].
    pub fn new(repository: R, cache: C, generator: G) -> Self {
        Self::with_config(repository, cache, generator, ServiceConfig::default())
    }

    pub fn with_config(repository: R, cache: C, generator: G, config: ServiceConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Arc::new(cache),
            generator: Arc::new(generator),
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn validate(&self, input: &NewPaste) -> Result<(), ServiceError> {
        if input.content.is_empty() {
            return Err(ServiceError::Validation(
                "paste contents cannot be empty".to_string(),
            ));
        }
        if input.content.len() > self.config.max_content_bytes {
            return Err(ServiceError::Validation(format!(
                "paste contents exceed {} bytes",
                self.config.max_content_bytes
            )));
        }
        if exceeds_chars(input.title.as_deref(), MAX_TITLE_CHARS) {
            return Err(ServiceError::Validation(format!(
                "title exceeds {MAX_TITLE_CHARS} characters"
            )));
        }
        if exceeds_chars(input.language.as_deref(), MAX_LANGUAGE_CHARS) {
            return Err(ServiceError::Validation(format!(
                "language exceeds {MAX_LANGUAGE_CHARS} characters"
            )));
        }
        Ok(())
    }

    /// Runs a repository call under the store deadline.
    async fn store<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = StorageResult<T>>,
    ) -> StorageResult<T> {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.config.store_timeout, "store call timed out");
                Err(StorageError::Timeout(format!(
                    "{operation} exceeded {:?}",
                    self.config.store_timeout
                )))
            }
        }
    }

    /// Runs a cache call under the cache deadline. Failures become `None`.
    async fn best_effort<T>(
        &self,
        operation: &'static str,
        id: &PasteId,
        call: impl Future<Output = CacheResult<T>>,
    ) -> Option<T> {
        match tokio::time::timeout(self.config.cache_timeout, call).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                warn!(id = %id, operation, error = %e, "cache call failed, continuing without cache");
                None
            }
            Err(_) => {
                warn!(id = %id, operation, timeout = ?self.config.cache_timeout, "cache call timed out, continuing without cache");
                None
            }
        }
    }

    async fn load(&self, id: &PasteId) -> Result<Paste, ServiceError> {
        self.store("get", self.repository.get(id))
            .await?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }
}

fn exceeds_chars(value: Option<&str>, limit: usize) -> bool {
    value.is_some_and(|v| v.chars().count() > limit)
}

#[async_trait]
impl<R: Repository, C: PasteCache, G: Generator> Pastebin for PasteService<R, C, G> {
    async fn create(
        &self,
        input: NewPaste,
        identity: Option<&Identity>,
    ) -> Result<PasteId, ServiceError> {
        let identity = identity.ok_or(ServiceError::Unauthenticated)?;
        self.validate(&input)?;

        let max_attempts = self.config.max_id_attempts.max(1);
        let mut paste = Paste {
            id: self.generator.generate().into(),
            timestamp: Timestamp::now(),
            content: input.content,
            email: identity.as_str().to_owned(),
            title: input.title,
            language: input.language,
        };

        let mut attempt = 1;
        loop {
            let outcome = self.store("insert", self.repository.insert(&paste)).await;
            match outcome {
                Ok(()) => break,
                Err(StorageError::Conflict(_)) if attempt < max_attempts => {
                    debug!(id = %paste.id, attempt, "paste id already taken, regenerating");
                    attempt += 1;
                    paste.id = self.generator.generate().into();
                }
                Err(StorageError::Conflict(_)) => {
                    warn!(attempts = attempt, "gave up allocating a paste id");
                    return Err(ServiceError::IdSpaceExhausted(attempt));
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(id = %paste.id, email = %paste.email, "created paste");
        self.best_effort("set", &paste.id, self.cache.set_paste(&paste.id, &paste))
            .await;

        Ok(paste.id)
    }

    async fn get(&self, id: &PasteId) -> Result<Paste, ServiceError> {
        if let Some(Some(paste)) = self.best_effort("get", id, self.cache.get_paste(id)).await {
            trace!(id = %id, "served paste from cache");
            return Ok(paste);
        }

        let paste = self.load(id).await?;
        self.best_effort("set", id, self.cache.set_paste(id, &paste))
            .await;
        Ok(paste)
    }

    async fn delete(&self, id: &PasteId, identity: Option<&Identity>) -> Result<(), ServiceError> {
        let identity = identity.ok_or(ServiceError::Unauthenticated)?;

        let paste = self.load(id).await?;
        if !paste.is_owned_by(identity) {
            debug!(id = %id, identity = %identity, "refusing delete by non-owner");
            return Err(ServiceError::Forbidden(id.to_string()));
        }

        if !self.store("delete", self.repository.delete(id)).await? {
            // Removed by a concurrent delete between the read and now.
            return Err(ServiceError::NotFound(id.to_string()));
        }

        self.best_effort("del", id, self.cache.del(id)).await;
        info!(id = %id, "deleted paste");
        Ok(())
    }

    async fn list_recent(&self) -> Result<Vec<PasteSummary>, ServiceError> {
        Ok(self
            .store("list_recent", self.repository.list_recent())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasta_cache::{MokaPasteCache, NoopCache};
    use pasta_core::{CacheError, ReadRepository};
    use pasta_generator::{RandomGenerator, SeqGenerator, ALPHABET};
    use pasta_storage::InMemoryRepository;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// A cache whose every call fails.
    #[derive(Default)]
    struct FailingCache {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PasteCache for FailingCache {
        async fn get_paste(&self, _id: &PasteId) -> CacheResult<Option<Paste>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn set_paste(&self, _id: &PasteId, _paste: &Paste) -> CacheResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::Unavailable("down".to_string()))
        }

        async fn del(&self, _id: &PasteId) -> CacheResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CacheError::Unavailable("down".to_string()))
        }
    }

    /// A cache that never answers within any reasonable deadline.
    struct StalledCache;

    #[async_trait]
    impl PasteCache for StalledCache {
        async fn get_paste(&self, _id: &PasteId) -> CacheResult<Option<Paste>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }

        async fn set_paste(&self, _id: &PasteId, _paste: &Paste) -> CacheResult<()> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }

        async fn del(&self, _id: &PasteId) -> CacheResult<()> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    /// Counts writes so tests can assert the cache was left alone.
    #[derive(Clone, Default)]
    struct RecordingCache {
        inner: MokaPasteCache,
        sets: Arc<AtomicUsize>,
        dels: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PasteCache for RecordingCache {
        async fn get_paste(&self, id: &PasteId) -> CacheResult<Option<Paste>> {
            self.inner.get_paste(id).await
        }

        async fn set_paste(&self, id: &PasteId, paste: &Paste) -> CacheResult<()> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            self.inner.set_paste(id, paste).await
        }

        async fn del(&self, id: &PasteId) -> CacheResult<()> {
            self.dels.fetch_add(1, Ordering::SeqCst);
            self.inner.del(id).await
        }
    }

    /// Serves reads from memory but fails every delete.
    #[derive(Default)]
    struct UndeletableRepository {
        inner: InMemoryRepository,
    }

    #[async_trait]
    impl ReadRepository for UndeletableRepository {
        async fn get(&self, id: &PasteId) -> StorageResult<Option<Paste>> {
            self.inner.get(id).await
        }

        async fn list_recent(&self) -> StorageResult<Vec<PasteSummary>> {
            self.inner.list_recent().await
        }
    }

    #[async_trait]
    impl Repository for UndeletableRepository {
        async fn insert(&self, paste: &Paste) -> StorageResult<()> {
            self.inner.insert(paste).await
        }

        async fn delete(&self, _id: &PasteId) -> StorageResult<bool> {
            Err(StorageError::Unavailable("connection reset".to_string()))
        }
    }

    /// A repository that is unreachable, or slow when `delay` is set.
    #[derive(Default)]
    struct BrokenRepository {
        delay: Option<Duration>,
    }

    impl BrokenRepository {
        async fn fail<T>(&self) -> StorageResult<T> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Err(StorageError::Unavailable("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl ReadRepository for BrokenRepository {
        async fn get(&self, _id: &PasteId) -> StorageResult<Option<Paste>> {
            self.fail().await
        }

        async fn list_recent(&self) -> StorageResult<Vec<PasteSummary>> {
            self.fail().await
        }
    }

    #[async_trait]
    impl Repository for BrokenRepository {
        async fn insert(&self, _paste: &Paste) -> StorageResult<()> {
            self.fail().await
        }

        async fn delete(&self, _id: &PasteId) -> StorageResult<bool> {
            self.fail().await
        }
    }

    /// Hands out a fixed list of ids, then repeats the last one.
    struct ScriptedGenerator {
        ids: Mutex<VecDeque<&'static str>>,
        last: &'static str,
    }

    impl ScriptedGenerator {
        fn new(ids: &[&'static str]) -> Self {
            Self {
                ids: Mutex::new(ids.iter().copied().collect()),
                last: ids.last().copied().unwrap_or("fallback"),
            }
        }
    }

    impl Generator for ScriptedGenerator {
        type Output = PasteId;

        fn generate(&self) -> PasteId {
            let next = self.ids.lock().unwrap().pop_front().unwrap_or(self.last);
            PasteId::new_unchecked(next)
        }
    }

    fn alice() -> Identity {
        Identity::new("a@x.com").unwrap()
    }

    fn bob() -> Identity {
        Identity::new("b@x.com").unwrap()
    }

    fn hello() -> NewPaste {
        NewPaste::new(
            "print('hi')",
            Some("Hello".to_string()),
            Some("python".to_string()),
        )
    }

    fn service() -> PasteService<InMemoryRepository, MokaPasteCache, RandomGenerator> {
        PasteService::new(
            InMemoryRepository::new(),
            MokaPasteCache::new(),
            RandomGenerator::default(),
        )
    }

    #[tokio::test]
    async fn create_get_delete_scenario() {
        let service = service();

        let id = service.create(hello(), Some(&alice())).await.unwrap();
        assert_eq!(id.as_str().len(), 8);
        assert!(id.as_str().bytes().all(|b| ALPHABET.contains(&b)));

        let paste = service.get(&id).await.unwrap();
        assert_eq!(paste.id, id);
        assert_eq!(paste.title.as_deref(), Some("Hello"));
        assert_eq!(paste.content, "print('hi')");
        assert_eq!(paste.email, "a@x.com");
        assert_eq!(paste.language.as_deref(), Some("python"));

        let err = service.delete(&id, Some(&bob())).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert!(service.get(&id).await.is_ok());

        service.delete(&id, Some(&alice())).await.unwrap();

        let err = service.get(&id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_requires_identity() {
        let service = service();

        let err = service.create(hello(), None).await.unwrap_err();

        assert!(matches!(err, ServiceError::Unauthenticated));
        assert!(service.list_recent().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_empty_content() {
        let service = service();

        let err = service
            .create(NewPaste::new("", None, None), Some(&alice()))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_oversized_fields() {
        let service = PasteService::with_config(
            InMemoryRepository::new(),
            NoopCache,
            RandomGenerator::default(),
            ServiceConfig::builder().max_content_bytes(4).build(),
        );

        let too_big = service
            .create(NewPaste::new("12345", None, None), Some(&alice()))
            .await
            .unwrap_err();
        assert!(matches!(too_big, ServiceError::Validation(_)));

        let long_title = service
            .create(
                NewPaste::new("ok", Some("t".repeat(MAX_TITLE_CHARS + 1)), None),
                Some(&alice()),
            )
            .await
            .unwrap_err();
        assert!(matches!(long_title, ServiceError::Validation(_)));

        let long_language = service
            .create(
                NewPaste::new("ok", None, Some("l".repeat(MAX_LANGUAGE_CHARS + 1))),
                Some(&alice()),
            )
            .await
            .unwrap_err();
        assert!(matches!(long_language, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn create_without_optional_fields() {
        let service = service();

        let id = service
            .create(NewPaste::new("body", Some("   ".to_string()), None), Some(&alice()))
            .await
            .unwrap();

        let paste = service.get(&id).await.unwrap();
        assert_eq!(paste.title, None);
        assert_eq!(paste.language, None);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let service = service();

        let err = service
            .get(&PasteId::new("absent").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_checks_existence_before_ownership() {
        let service = service();

        let err = service
            .delete(&PasteId::new("absent").unwrap(), Some(&bob()))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_requires_identity() {
        let service = service();
        let id = service.create(hello(), Some(&alice())).await.unwrap();

        let err = service.delete(&id, None).await.unwrap_err();

        assert!(matches!(err, ServiceError::Unauthenticated));
        assert!(service.get(&id).await.is_ok());
    }

    #[tokio::test]
    async fn list_recent_is_newest_first() {
        let service = PasteService::new(
            InMemoryRepository::new(),
            NoopCache,
            SeqGenerator::with_prefix("p"),
        );

        for title in ["A", "B", "C"] {
            service
                .create(
                    NewPaste::new("x", Some(title.to_string()), None),
                    Some(&alice()),
                )
                .await
                .unwrap();
        }

        let titles: Vec<_> = service
            .list_recent()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title.unwrap())
            .collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn get_populates_cache_and_delete_invalidates_it() {
        let cache = RecordingCache::default();
        let service = PasteService::new(
            InMemoryRepository::new(),
            cache.clone(),
            RandomGenerator::default(),
        );

        let id = service.create(hello(), Some(&alice())).await.unwrap();
        cache.inner.del(&id).await.unwrap();

        service.get(&id).await.unwrap();
        assert!(cache.inner.get_paste(&id).await.unwrap().is_some());

        service.delete(&id, Some(&alice())).await.unwrap();

        assert!(cache.inner.get_paste(&id).await.unwrap().is_none());
        assert!(matches!(
            service.get(&id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn cache_failures_never_fail_operations() {
        let service = PasteService::new(
            InMemoryRepository::new(),
            FailingCache::default(),
            RandomGenerator::default(),
        );

        let id = service.create(hello(), Some(&alice())).await.unwrap();
        assert_eq!(service.get(&id).await.unwrap().content, "print('hi')");
        service.delete(&id, Some(&alice())).await.unwrap();

        assert!(service.cache.calls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test]
    async fn stalled_cache_is_bypassed() {
        let service = PasteService::with_config(
            InMemoryRepository::new(),
            StalledCache,
            RandomGenerator::default(),
            ServiceConfig::builder()
                .cache_timeout(Duration::from_millis(20))
                .build(),
        );

        let id = service.create(hello(), Some(&alice())).await.unwrap();
        assert!(service.get(&id).await.is_ok());
        service.delete(&id, Some(&alice())).await.unwrap();
    }

    #[tokio::test]
    async fn store_failure_on_create_leaves_cache_untouched() {
        let cache = RecordingCache::default();
        let service = PasteService::new(
            BrokenRepository::default(),
            cache.clone(),
            RandomGenerator::default(),
        );

        let err = service.create(hello(), Some(&alice())).await.unwrap_err();

        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert_eq!(cache.sets.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn store_failure_on_read_paths_is_unavailable() {
        let service = PasteService::new(
            BrokenRepository::default(),
            NoopCache,
            RandomGenerator::default(),
        );
        let id = PasteId::new("abc").unwrap();

        assert!(matches!(
            service.get(&id).await.unwrap_err(),
            ServiceError::Unavailable(_)
        ));
        assert!(matches!(
            service.list_recent().await.unwrap_err(),
            ServiceError::Unavailable(_)
        ));
        assert!(matches!(
            service.delete(&id, Some(&alice())).await.unwrap_err(),
            ServiceError::Unavailable(_)
        ));
    }

    #[tokio::test]
    async fn store_failure_on_delete_keeps_cached_paste() {
        let cache = RecordingCache::default();
        let service = PasteService::new(
            UndeletableRepository::default(),
            cache.clone(),
            RandomGenerator::default(),
        );
        let id = service.create(hello(), Some(&alice())).await.unwrap();
        service.get(&id).await.unwrap();
        assert!(cache.inner.get_paste(&id).await.unwrap().is_some());

        let err = service.delete(&id, Some(&alice())).await.unwrap_err();

        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert_eq!(cache.dels.load(Ordering::SeqCst), 0);
        assert!(cache.inner.get_paste(&id).await.unwrap().is_some());
        assert_eq!(service.get(&id).await.unwrap().content, "print('hi')");
    }

    #[tokio::test]
    async fn slow_store_times_out() {
        let service = PasteService::with_config(
            BrokenRepository {
                delay: Some(Duration::from_secs(60)),
            },
            NoopCache,
            RandomGenerator::default(),
            ServiceConfig::builder()
                .store_timeout(Duration::from_millis(20))
                .build(),
        );

        let err = service.list_recent().await.unwrap_err();

        assert!(matches!(err, ServiceError::Timeout(_)));
    }

    #[tokio::test]
    async fn collision_triggers_regeneration() {
        let repository = InMemoryRepository::new();
        repository
            .insert(&Paste {
                id: PasteId::new_unchecked("taken"),
                timestamp: Timestamp::now(),
                content: "original".to_string(),
                email: "b@x.com".to_string(),
                title: None,
                language: None,
            })
            .await
            .unwrap();
        let service = PasteService::new(
            repository,
            NoopCache,
            ScriptedGenerator::new(&["taken", "fresh"]),
        );

        let id = service.create(hello(), Some(&alice())).await.unwrap();

        assert_eq!(id.as_str(), "fresh");
        assert_eq!(
            service
                .get(&PasteId::new_unchecked("taken"))
                .await
                .unwrap()
                .content,
            "original"
        );
    }

    #[tokio::test]
    async fn persistent_collision_exhausts_id_space() {
        let service = PasteService::new(
            InMemoryRepository::new(),
            NoopCache,
            ScriptedGenerator::new(&["same"]),
        );
        service.create(hello(), Some(&alice())).await.unwrap();

        let err = service.create(hello(), Some(&alice())).await.unwrap_err();

        assert!(matches!(err, ServiceError::IdSpaceExhausted(5)));
    }
}
