//! Path management for the finance tracker
//!
//! ## Path Resolution Order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (e.g. `~/.config/finance-tracker` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::TrackerError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Manages all paths used by the finance tracker
#[derive(Debug, Clone)]
pub struct TrackerPaths {
    base_dir: PathBuf,
}

impl TrackerPaths {
    /// Create a new TrackerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform configuration directory can be found
    /// and `FINTRACK_DATA_DIR` is not set.
    pub fn new() -> Result<Self, TrackerError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create TrackerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the log file
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("fintrack.log")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to categories.json
    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), TrackerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TrackerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TrackerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if the tracker has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, TrackerError> {
    ProjectDirs::from("", "", "finance-tracker")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            TrackerError::Config(format!(
                "Could not determine a configuration directory; set {}",
                DATA_DIR_ENV
            ))
        })
}
