//! The paste service: read-through caching, ownership checks and id
//! allocation on top of a [`Repository`](pasta_core::Repository).

pub mod config;
pub mod service;

pub use config::ServiceConfig;
pub use pasta_core::ServiceError;
pub use service::PasteService;
