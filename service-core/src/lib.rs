//! service-core: Shared infrastructure for the presentation HTTP services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
