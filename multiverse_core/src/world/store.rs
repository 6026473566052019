use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use super::properties::WorldProperties;
use crate::error::ConfigError;

#[derive(Default, Serialize, Deserialize)]
struct WorldsFile {
    #[serde(default)]
    worlds: BTreeMap<String, WorldProperties>,
}

/// Keeps the properties of every managed world in one TOML file, one `[worlds.<name>]`
/// table per world.
pub struct WorldStore {
    path: PathBuf,
}

impl WorldStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored world, in name order. A missing file holds no worlds.
    pub fn load(&self) -> Result<Vec<WorldProperties>, ConfigError> {
        if !self.path.exists() {
            debug!("No world store at {}", self.path.display());
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let file: WorldsFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;

        Ok(file
            .worlds
            .into_iter()
            .map(|(name, mut properties)| {
                // The table key is authoritative.
                properties.set_name(&name);
                properties
            })
            .collect())
    }

    /// Replaces the file with exactly `worlds`.
    pub fn save(
        &self,
        worlds: impl IntoIterator<Item = WorldProperties>,
    ) -> Result<(), ConfigError> {
        let file = WorldsFile {
            worlds: worlds
                .into_iter()
                .map(|properties| (properties.name().to_string(), properties))
                .collect(),
        };

        let text = toml::to_string_pretty(&file)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
