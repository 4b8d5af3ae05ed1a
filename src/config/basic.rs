use serde::{Deserialize, Serialize};

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// SQLite URL of the local session storage.
    /// TOML: `basic.storage_url`. Default: `sqlite://aquasync.db`.
    #[serde(default = "default_storage_url")]
    pub storage_url: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            loglevel: default_loglevel(),
            storage_url: default_storage_url(),
        }
    }
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_storage_url() -> String {
    "sqlite://aquasync.db".to_string()
}
