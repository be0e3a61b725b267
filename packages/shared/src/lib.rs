//! Utilities shared by the roomdrop binaries: logging setup and clocks.

pub mod logger;
pub mod time;
