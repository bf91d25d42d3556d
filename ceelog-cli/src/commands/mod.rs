//! Command handlers -- one module per subcommand

pub mod config;
pub mod convert;

use std::path::{Path, PathBuf};

use tracing::debug;

use ceelog_core::config::CeeConfig;

use crate::cli::DEFAULT_CONFIG_PATH;
use crate::error::CliError;

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Defaults => "(defaults)".to_owned(),
        }
    }
}

/// Load the effective configuration (file + env overrides + defaults).
///
/// An explicit `--config` path must exist. Without one, `./ceelog.toml` is used
/// when present and the built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<(CeeConfig, ConfigSource), CliError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            default.exists().then_some(default)
        }
    };

    match path {
        Some(path) => {
            let config = CeeConfig::load(&path).map_err(|e| CliError::Config(e.to_string()))?;
            debug!(path = %path.display(), "configuration loaded");
            Ok((config, ConfigSource::File(path)))
        }
        None => {
            let mut config = CeeConfig::default();
            config.apply_env_overrides();
            config
                .validate()
                .map_err(|e| CliError::Config(e.to_string()))?;
            debug!("no configuration file, using defaults");
            Ok((config, ConfigSource::Defaults))
        }
    }
}
