//! Infrastructure layer: concrete implementations of the domain seams and DTOs.

pub mod dto;
pub mod repository;
