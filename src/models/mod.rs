//! Database and configuration models of the order service.

#[cfg(feature = "server")]
pub mod config;
pub mod order;
