//! Cache implementations for pastes.
//!
//! Every cache here implements [`PasteCache`] and is treated as
//! best-effort by the service: a failure or a miss falls back to the
//! repository.

pub mod layered;
pub mod moka;
pub mod noop;
pub mod redis;

pub use layered::LayeredCache;
pub use self::moka::{MokaCacheConfig, MokaPasteCache, DEFAULT_CAPACITY, DEFAULT_TTL};
pub use noop::NoopCache;
pub use pasta_core::cache::Result;
pub use pasta_core::{CacheError, PasteCache};
pub use self::redis::{RedisPasteCache, DEFAULT_KEY_PREFIX};
