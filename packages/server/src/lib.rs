//! Room-scoped, ephemeral file-sharing server.
//!
//! Visitors join a room by typing a short code; everyone holding the same code
//! sees, uploads, downloads and deletes the same set of files, which expire
//! after a retention period.

pub mod config;

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
