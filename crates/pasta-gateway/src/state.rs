use axum::http::HeaderName;
use pasta_core::Pastebin;
use std::sync::Arc;

/// Header carrying the caller's email, set by the authenticating proxy.
pub const DEFAULT_IDENTITY_HEADER: &str = "x-pasta-user-email";

#[derive(Clone)]
pub struct AppState {
    pastebin: Arc<dyn Pastebin>,
    identity_header: HeaderName,
}

impl AppState {
    pub fn new(pastebin: Arc<dyn Pastebin>, identity_header: HeaderName) -> Self {
        Self {
            pastebin,
            identity_header,
        }
    }

    /// Creates state that reads identities from [`DEFAULT_IDENTITY_HEADER`].
    pub fn with_default_header(pastebin: Arc<dyn Pastebin>) -> Self {
        Self::new(
            pastebin,
            HeaderName::from_static(DEFAULT_IDENTITY_HEADER),
        )
    }

    pub fn pastebin(&self) -> &dyn Pastebin {
        self.pastebin.as_ref()
    }

    pub fn identity_header(&self) -> &HeaderName {
        &self.identity_header
    }
}
