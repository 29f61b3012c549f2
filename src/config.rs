use std::{fs, path::Path};

use log::info;
use serde::Deserialize;

use crate::{dirs::Dirs, model::target_size::TargetSize};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Read-only settings. The application never writes this file back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub default_target_size: TargetSize,
    pub filename_stem: String,
    pub jpeg_quality: u8,
    pub preview_max_side: u32,
    pub log_spec: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_target_size: TargetSize::default(),
            filename_stem: "image".to_string(),
            jpeg_quality: 95,
            preview_max_side: 2048,
            log_spec: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        match Dirs::Config.path() {
            Some(dir) => Self::load_from(&dir.join(CONFIG_FILE)),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(config_path: &Path) -> Result<Config, ConfigError> {
        if config_path.exists() {
            info!("Reading config from {:?}", config_path);
            let buf = fs::read_to_string(config_path)?;
            Self::from_toml_str(&buf)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml_str(buf: &str) -> Result<Config, ConfigError> {
        let mut config: Config = toml::from_str(buf)?;
        config.jpeg_quality = config.jpeg_quality.clamp(1, 100);
        config.preview_max_side = config.preview_max_side.max(256);
        Ok(config)
    }
}
