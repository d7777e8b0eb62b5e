//! Configuration management for Blockkit
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    AUTOPLAY_INTERVAL_MS_DEFAULT, AUTOPLAY_INTERVAL_MS_MIN, DEBOUNCE_MS_DEFAULT, DEBOUNCE_MS_MAX, PAGE_SIZE_DEFAULT,
    PAGE_SIZE_MAX, PAGE_SIZE_MIN,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub carousel: CarouselConfig,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

/// Fetching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Default page size for query specs built without an explicit one
    pub default_page_size: u32,
    /// Request embedded relations (featured media, terms) by default
    pub embed_relations: bool,
}

/// Carousel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Start carousels in auto-advance mode
    pub autoplay: bool,
    /// Auto-advance interval in milliseconds
    pub autoplay_interval_ms: u64,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Debounce delay for typed queries in milliseconds
    pub debounce_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to a file
    pub enabled: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            default_page_size: PAGE_SIZE_DEFAULT,
            embed_relations: true,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            autoplay_interval_ms: AUTOPLAY_INTERVAL_MS_DEFAULT,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS_DEFAULT,
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("blockkit.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("blockkit").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch.default_page_size < PAGE_SIZE_MIN || self.fetch.default_page_size > PAGE_SIZE_MAX {
            anyhow::bail!(
                "default_page_size must be between {} and {}, got {}",
                PAGE_SIZE_MIN,
                PAGE_SIZE_MAX,
                self.fetch.default_page_size
            );
        }

        if self.carousel.autoplay_interval_ms < AUTOPLAY_INTERVAL_MS_MIN {
            anyhow::bail!(
                "autoplay_interval_ms must be at least {}, got {}",
                AUTOPLAY_INTERVAL_MS_MIN,
                self.carousel.autoplay_interval_ms
            );
        }

        if self.search.debounce_ms > DEBOUNCE_MS_MAX {
            anyhow::bail!(
                "debounce_ms cannot exceed {}, got {}",
                DEBOUNCE_MS_MAX,
                self.search.debounce_ms
            );
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Blockkit Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("blockkit"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
