mod health;
mod page;
mod update;

pub use health::health_handler;
pub use page::{archive_handler, index_handler, show_paste_handler};
pub use update::{create_paste_handler, delete_paste_handler, delete_without_id_handler};
