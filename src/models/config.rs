//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_database_timeout_secs() -> u64 {
    10
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Seconds to wait for a pooled connection or a locked database.
    #[serde(default = "default_database_timeout_secs")]
    pub database_timeout_secs: u64,
}
