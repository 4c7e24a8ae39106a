//! Settings file loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::map::MapFormat;

/// Default settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "antenna-grid.toml";

/// Tool settings: where the map lives and what the demo run queries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    /// Map file to load.
    pub map: PathBuf,
    /// Map layout; derived from the file extension when absent.
    pub format: Option<MapFormat>,
    /// Write the built-in map when `map` does not exist.
    pub create_default_map: bool,
    pub demo: DemoSettings,
}

/// Queries run by the `demo` command.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DemoSettings {
    pub dfs_start: [i32; 2],
    pub bfs_start: [i32; 2],
    pub path_origin: [i32; 2],
    pub path_destination: [i32; 2],
    pub intersection_frequencies: [char; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map: PathBuf::from("data/mapa.bin"),
            format: None,
            create_default_map: true,
            demo: DemoSettings::default(),
        }
    }
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            dfs_start: [5, 7],
            bfs_start: [8, 8],
            path_origin: [4, 4],
            path_destination: [7, 3],
            intersection_frequencies: ['A', '0'],
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the settings file
    ///
    /// # Returns
    /// * `Ok(Settings)` if the file was successfully loaded and parsed
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::parse(&content)
    }

    /// Parse settings from TOML text. Missing keys take their defaults.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load `config_path` if given, else the default file if present, else defaults.
    ///
    /// An explicitly requested file that cannot be read is an error; a missing
    /// default file is not.
    pub fn resolve(config_path: Option<&Path>) -> Result<Self, String> {
        match config_path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    log::debug!("No {} found, using built-in settings", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }
}
