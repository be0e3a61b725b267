//! Repository implementations.

pub mod filesystem;
pub mod inmemory;

pub use filesystem::{FileSystemFileRegistry, FileSystemRoomStore};
pub use inmemory::InMemorySessionBinder;
