mod account;
mod backend;
mod basic;

pub use account::AccountConfig;
pub use backend::BackendConfig;
pub use basic::BasicConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core client configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Backend endpoint and HTTP client settings (see `backend` table in config.toml).
    #[serde(default)]
    pub backend: BackendConfig,

    /// Optional bootstrap credentials (see `account` table in config.toml).
    #[serde(default)]
    pub account: AccountConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "AQUASYNC_";

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and
    /// `AQUASYNC_`-prefixed environment variables (`AQUASYNC_BACKEND__BASE_URL`, ...).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration by merging defaults, `config.toml` if present and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
