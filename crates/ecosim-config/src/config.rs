//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// `<platform config dir>/ecosim`, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ecosim"))
}

/// Top-level world generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub generation: GenerationConfig,
    pub boundary: BoundarySettings,
    pub debug: DebugConfig,
}

/// Which world to generate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    /// World extent along X in world units.
    pub world_width: f64,
    /// World extent along Y in world units.
    pub world_height: f64,
    /// Edge length of one grid cell in world units.
    pub cell_size: f64,
}

/// Climate field sampling. Coordinates are `(cell + offset) * frequency`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// fBm octaves for every field.
    pub octaves: u32,
    pub elevation_frequency: f64,
    pub elevation_offset: f64,
    pub moisture_frequency: f64,
    pub moisture_offset: f64,
    pub temperature_frequency: f64,
    pub temperature_offset: f64,
    pub island_frequency: f64,
}

/// Region boundary overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundarySettings {
    /// Segment thickness in world units.
    pub thickness: f64,
    /// Max cross-extent difference for two rectangles to merge.
    pub alignment_tolerance: f64,
    /// Max gap between facing edges for two rectangles to merge.
    pub gap_tolerance: f64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Edge length of one cell in exported debug images.
    pub pixels_per_cell: u32,
    /// Where to write debug PNGs; nothing is exported when unset.
    pub export_dir: Option<PathBuf>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1234,
            world_width: 2000.0,
            world_height: 1200.0,
            cell_size: 50.0,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            octaves: 4,
            elevation_frequency: 0.1,
            elevation_offset: 0.0,
            moisture_frequency: 0.08,
            moisture_offset: 1000.0,
            temperature_frequency: 0.06,
            temperature_offset: 2000.0,
            island_frequency: 0.05,
        }
    }
}

impl Default for BoundarySettings {
    fn default() -> Self {
        Self {
            thickness: 8.0,
            alignment_tolerance: 1.0,
            gap_tolerance: 2.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            pixels_per_cell: 4,
            export_dir: None,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load `config.ron` from `config_dir`, writing a default one if absent.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }

    /// Save to `config_dir/config.ron`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)
    }

    /// Re-read the file; `Some` only if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
