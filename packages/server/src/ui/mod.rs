//! HTTP interface of the file-sharing server.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
