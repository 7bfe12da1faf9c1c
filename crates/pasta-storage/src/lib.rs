//! Paste store adapters.
//!
//! [`InMemoryRepository`] keeps everything in process and is the default
//! for development and tests; [`MySqlRepository`] is the durable backend.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use pasta_core::{ReadRepository, Repository, StorageError};
