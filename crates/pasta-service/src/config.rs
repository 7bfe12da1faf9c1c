use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_ID_ATTEMPTS: usize = 5;
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 1024;
/// Longest accepted language tag, in characters.
pub const MAX_LANGUAGE_CHARS: usize = 64;

/// Tunables for [`PasteService`](crate::PasteService).
#[derive(Debug, Clone, TypedBuilder)]
pub struct ServiceConfig {
    /// Deadline for a single repository call.
    #[builder(default = DEFAULT_STORE_TIMEOUT)]
    pub store_timeout: Duration,
    /// Deadline for a single cache call. Expiry counts as a cache miss.
    #[builder(default = DEFAULT_CACHE_TIMEOUT)]
    pub cache_timeout: Duration,
    /// How many ids `create` tries before giving up on collisions.
    #[builder(default = DEFAULT_MAX_ID_ATTEMPTS)]
    pub max_id_attempts: usize,
    #[builder(default = DEFAULT_MAX_CONTENT_BYTES)]
    pub max_content_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
