use std::{
    env,
    net::SocketAddr,
    path::Path,
};

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

use bookshelf_core::store::StoreOptions;

use crate::error::AppResult;

/// Application configuration.
///
/// Contains all configuration settings for the bookshelf server.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Server configuration settings
    pub server: ServerConfig,
    /// Store behaviour
    #[serde(default)]
    pub store: StoreConfig,
    /// Log output configuration
    pub tracing: TracingConfig,
}

/// Server configuration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub address: SocketAddr,
}

/// Store behaviour settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Recompute `finished` when a book is updated
    #[serde(default)]
    pub refresh_finished_on_update: bool,
}

impl StoreConfig {
    pub fn options(&self) -> StoreOptions {
        StoreOptions {
            refresh_finished_on_update: self.refresh_finished_on_update,
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TracingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

const CONFIG_DIR_ENV: &str = "BOOKSHELF_CONFIG_DIR";
const CONFIG_PATH_ENV: &str = "BOOKSHELF_CONFIG_PATH";
const ENV_PREFIX: &str = "BOOKSHELF";
const VERSION: &str = env!("CARGO_PKG_VERSION");

impl AppConfig {
    /// Loads configuration from files and environment variables.
    ///
    /// Sources, later ones winning: built-in defaults, `<dir>/default.*`, `<dir>/local.*`,
    /// the file named by `BOOKSHELF_CONFIG_PATH`, then `BOOKSHELF__SECTION__KEY`
    /// environment variables. `<dir>` is `BOOKSHELF_CONFIG_DIR` or `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or a value has the wrong type.
    pub fn load() -> AppResult<Self> {
        let config_dir = env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| "config".to_string());
        let mut config_builder = Self::file_sources(Path::new(&config_dir))?;

        // Add override settings file.
        if let Ok(override_path) = env::var(CONFIG_PATH_ENV) {
            config_builder =
                config_builder.add_source(File::with_name(&override_path).required(false));
        }

        // Add in settings from the environment (with a prefix of BOOKSHELF)
        config_builder =
            config_builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Ok(config_builder.build()?.try_deserialize()?)
    }

    /// Loads configuration from the files in `dir` only, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or a value has the wrong type.
    pub fn from_dir(dir: impl AsRef<Path>) -> AppResult<Self> {
        Ok(Self::file_sources(dir.as_ref())?
            .build()?
            .try_deserialize()?)
    }

    fn file_sources(dir: &Path) -> AppResult<ConfigBuilder<DefaultState>> {
        let config_builder = Config::builder()
            .set_default("distribution.name", "bookshelf")?
            .set_default("distribution.version", VERSION)?
            .set_default("server.address", "127.0.0.1:9000")?
            .set_default("store.refresh_finished_on_update", false)?
            .set_default("tracing.filter", "info")?;

        let default_path = dir.join("default");
        // The local file shouldn't be checked in to git
        let local_path = dir.join("local");

        Ok(config_builder
            .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
            .add_source(File::with_name(&local_path.to_string_lossy()).required(false)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_falls_back_to_defaults() {
        let config = AppConfig::from_dir("does/not/exist").unwrap();

        assert_eq!(config.distribution.name, "bookshelf");
        assert_eq!(config.distribution.version.as_deref(), Some(VERSION));
        assert_eq!(config.server.address, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert!(!config.store.refresh_finished_on_update);
        assert_eq!(config.tracing.filter, "info");
    }

    #[test]
    fn shipped_default_file_parses() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../config");
        let config = AppConfig::from_dir(dir).unwrap();

        assert_eq!(config.distribution.name, "bookshelf");
        assert!(!config.store.options().refresh_finished_on_update);
    }
}
