//! In-memory implementations.

mod session;

pub use session::InMemorySessionBinder;
