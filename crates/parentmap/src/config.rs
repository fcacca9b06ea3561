//! Configuration management for parentmap.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::images::{
    SizePreset, DEFAULT_PLACEHOLDER_EXTENSION, DEFAULT_PLACEHOLDER_PREFIX, DEFAULT_PRELOAD_LIMIT,
};
use crate::venue::Category;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config dir.
const APP_DIR_NAME: &str = "parentmap";

/// Dataset loaded when none is configured.
const DEFAULT_DATASET: &str = "data/locations.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PARENTMAP_`)
/// 2. TOML config file at `~/.config/parentmap/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration.
    pub data: DataConfig,
    /// Image configuration.
    pub images: ImagesConfig,
}

/// Dataset-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Dataset files, merged in order.
    pub paths: Vec<PathBuf>,
    /// Where `export` writes when no output is given.
    pub export_path: Option<PathBuf>,
}

/// Image-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Directory prefix of placeholder artwork, with leading and trailing `/`.
    pub placeholder_prefix: String,
    /// Placeholder file extension, with leading `.`.
    pub placeholder_extension: String,
    /// Category whose placeholder is used when a venue has none.
    pub fallback_category: String,
    /// Size preset used when none is requested.
    pub default_size: SizePreset,
    /// Number of leading venues considered for preload hints.
    pub preload_limit: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from(DEFAULT_DATASET)],
            export_path: None,
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            placeholder_extension: DEFAULT_PLACEHOLDER_EXTENSION.to_string(),
            fallback_category: Category::Playhouse.to_string(),
            default_size: SizePreset::Card,
            preload_limit: DEFAULT_PRELOAD_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PARENTMAP_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let images = &self.images;

        if !images.placeholder_prefix.starts_with('/') || !images.placeholder_prefix.ends_with('/')
        {
            return Err(Error::config_validation(format!(
                "placeholder_prefix must start and end with '/', got {:?}",
                images.placeholder_prefix
            )));
        }

        if !images.placeholder_extension.starts_with('.') || images.placeholder_extension.len() < 2
        {
            return Err(Error::config_validation(format!(
                "placeholder_extension must look like '.svg', got {:?}",
                images.placeholder_extension
            )));
        }

        if !Category::from(images.fallback_category.as_str()).is_known() {
            return Err(Error::config_validation(format!(
                "fallback_category must be a known category, got {:?}",
                images.fallback_category
            )));
        }

        if self.data.paths.is_empty() {
            return Err(Error::config_validation(
                "data.paths must list at least one dataset",
            ));
        }

        Ok(())
    }

    /// Where `export` writes by default.
    #[must_use]
    pub fn export_path(&self) -> PathBuf {
        self.data
            .export_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("dist/locations.json"))
    }
}
