//! Path management for kassebog
//!
//! Provides XDG-compliant path resolution for configuration files.
//!
//! ## Path Resolution Order
//!
//! 1. `KASSEBOG_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/kassebog` or `~/.config/kassebog`
//! 3. Windows: `%APPDATA%\kassebog`

use std::path::PathBuf;

use crate::error::KassebogError;

/// Manages all paths used by kassebog
#[derive(Debug, Clone)]
pub struct KassebogPaths {
    /// Base directory for all kassebog configuration
    base_dir: PathBuf,
}

impl KassebogPaths {
    /// Create a new KassebogPaths instance
    ///
    /// Path resolution:
    /// 1. `KASSEBOG_DATA_DIR` env var (explicit override)
    /// 2. Unix: `$XDG_CONFIG_HOME/kassebog` or `~/.config/kassebog`
    /// 3. Windows: `%APPDATA%\kassebog`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, KassebogError> {
        let base_dir = if let Ok(custom) = std::env::var("KASSEBOG_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create KassebogPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/kassebog/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the category rules file
    pub fn rules_file(&self) -> PathBuf {
        self.base_dir.join("rules.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), KassebogError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| KassebogError::Io(format!("Failed to create base directory: {}", e)))?;

        Ok(())
    }

    /// Check if kassebog has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, KassebogError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                KassebogError::Config("Could not determine home directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("kassebog"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, KassebogError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| KassebogError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("kassebog"))
}
