//! Configuration loading.
//!
//! Layers, later ones win: built-in defaults, the TOML file named by
//! `TRACKED_TIMES_CONFIG` (if any), then `TRACKED_TIMES_*` environment variables.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::modules::time_entries::use_cases::list_time_entries_by_user::query_options::PaginationSettings;

pub const ENV_PREFIX: &str = "TRACKED_TIMES_";
pub const CONFIG_PATH_VAR: &str = "TRACKED_TIMES_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Page size used when a request omits `limit` or sends an unusable one.
    pub default_page_size: u32,
    /// Upper bound for `limit`; larger values are clamped.
    pub max_page_size: u32,
    /// Tracing filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// JSON snapshot to seed the in-memory store with.
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            default_page_size: 30,
            max_page_size: 50,
            log_filter: "info".to_string(),
            seed_path: None,
        }
    }
}

impl Config {
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        let path = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        Self::load_from(path.as_deref())
    }

    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX)).extract()
    }

    pub fn pagination(&self) -> PaginationSettings {
        PaginationSettings::new(self.default_page_size, self.max_page_size)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.listen_addr.parse()
    }
}
