//! HTTP handlers.

mod error;
mod extract;
mod file;
mod http;
mod session;

pub use file::{delete_file, download_file, list_files, upload_file};
pub use http::{current_room, health_check, join_room, join_room_via_link, leave_room};
