//! Shared building blocks for the backend service.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod response;
