//! Data Transfer Objects (DTOs) for the HTTP API.
//!
//! - `http`: request forms and JSON response bodies
//! - `conversion`: domain entity → DTO conversions

pub mod conversion;
pub mod http;
