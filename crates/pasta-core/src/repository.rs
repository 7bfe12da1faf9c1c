use crate::error::Result;
use crate::paste::{Paste, PasteSummary};
use crate::paste_id::PasteId;
use async_trait::async_trait;

/// A read-only view of a paste repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing read paths to depend on a narrower contract.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the paste stored under `id`.
    /// Returns `None` if no paste exists.
    async fn get(&self, id: &PasteId) -> Result<Option<Paste>>;

    /// Lists every stored paste as a summary, newest first.
    ///
    /// The result is unbounded; callers are responsible for the cost.
    async fn list_recent(&self) -> Result<Vec<PasteSummary>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new paste. Returns `Err(Conflict)` if the id already exists.
    async fn insert(&self, paste: &Paste) -> Result<()>;

    /// Deletes the paste stored under `id`.
    /// Returns `true` if the paste existed and was removed.
    async fn delete(&self, id: &PasteId) -> Result<bool>;
}
