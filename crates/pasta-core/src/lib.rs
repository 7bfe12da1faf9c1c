//! Core types and traits for the Pasta pastebin.
//!
//! This crate provides the paste model and the storage and cache
//! contracts shared by the adapters, the service and the HTTP gateway.

pub mod cache;
pub mod error;
pub mod paste;
pub mod paste_id;
pub mod pastebin;
pub mod repository;

pub use cache::PasteCache;
pub use error::{CacheError, CoreError, ServiceError, StorageError};
pub use paste::{Identity, NewPaste, Paste, PasteSummary};
pub use paste_id::PasteId;
pub use pastebin::Pastebin;
pub use repository::{ReadRepository, Repository};
