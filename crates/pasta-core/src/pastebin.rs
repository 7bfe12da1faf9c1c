use crate::error::ServiceError;
use crate::paste::{Identity, NewPaste, Paste, PasteSummary};
use crate::paste_id::PasteId;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ServiceError>;

/// The operations a pastebin offers to its front ends.
///
/// `create` and `delete` act on behalf of an identity and fail with
/// [`ServiceError::Unauthenticated`] when none is given. `get` and
/// `list_recent` are anonymous.
#[async_trait]
pub trait Pastebin: Send + Sync + 'static {
    /// Stores a new paste owned by `identity` and returns its id.
    async fn create(&self, input: NewPaste, identity: Option<&Identity>) -> Result<PasteId>;

    /// Fetches a paste by id.
    async fn get(&self, id: &PasteId) -> Result<Paste>;

    /// Deletes a paste. Only the creator may do this.
    async fn delete(&self, id: &PasteId, identity: Option<&Identity>) -> Result<()>;

    /// Lists all pastes, newest first.
    async fn list_recent(&self) -> Result<Vec<PasteSummary>>;
}
