//! HTTP front end for the pastebin.

pub mod app;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod state;
pub mod views;

pub use app::App;
pub use error::{AppError, Result};
pub use state::{AppState, DEFAULT_IDENTITY_HEADER};
