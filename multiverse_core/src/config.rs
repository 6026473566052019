use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{LevelFilter, info};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub locale: String,
    /// 0 logs at info, 1 at debug, anything higher at trace.
    pub debug_level: u8,
    pub first_run: bool,
    /// World new players are sent to; empty means the host's default world.
    pub first_spawn_world: String,
    pub worlds_file: PathBuf,
    pub messages_dir: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> CoreConfig {
        CoreConfig {
            locale: "en".to_string(),
            debug_level: 0,
            first_run: true,
            first_spawn_world: String::new(),
            worlds_file: PathBuf::from("worlds.toml"),
            messages_dir: PathBuf::from("messages"),
        }
    }
}

impl CoreConfig {
    /// Loads the config at `path`, writing the defaults there first if the file does not exist.
    pub fn load(path: &Path) -> Result<CoreConfig, ConfigError> {
        if !path.exists() {
            info!("No config at {}, writing defaults", path.display());
            let config = CoreConfig::default();
            config.save(path)?;
            return Ok(config);
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.debug_level {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Resolves a configured path against the plugin's data folder.
    pub fn resolve(&self, data_folder: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            data_folder.join(path)
        }
    }
}
