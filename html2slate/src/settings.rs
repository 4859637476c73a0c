use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use slate_core::ConverterConfig;
use thiserror::Error;

pub const QUALIFIER: &str = "org";
pub const ORGANIZATION: &str = "eea";
pub const APPLICATION: &str = "html2slate";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse settings at {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn config_root() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|p| p.config_dir().to_path_buf())
}

pub fn settings_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join("settings.toml"))
}

pub fn parse_settings(input: &str) -> Result<ConverterConfig, toml::de::Error> {
    let config: ConverterConfig = toml::from_str(input)?;
    Ok(config.lowercased())
}

/// Reads settings from `path`. A missing file yields the defaults.
pub fn load_from_path(path: &Path) -> Result<ConverterConfig, SettingsError> {
    if !path.exists() {
        log::debug!("no settings at {}, using defaults", path.display());
        return Ok(ConverterConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&contents).map_err(|source| SettingsError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load() -> Result<ConverterConfig, SettingsError> {
    match settings_path() {
        Some(path) => {
            log::debug!("settings path: {}", path.display());
            load_from_path(&path)
        }
        None => Ok(ConverterConfig::default()),
    }
}
