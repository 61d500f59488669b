//! User settings for the finance tracker
//!
//! Manages display preferences, the default user the CLI acts on behalf of,
//! and the default log level.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::TrackerError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// User ID that commands act on when `--user` is not given
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_user() -> String {
    "local".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_user: default_user(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, TrackerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| TrackerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                TrackerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject settings that would fail later at display time
    pub fn validate(&self) -> Result<(), TrackerError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(TrackerError::Config(format!(
                "Invalid date_format '{}' in settings",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), TrackerError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TrackerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TrackerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_user, "local");
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".to_string();
        settings.default_user = "alice".to_string();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_user, "alice");
    }

    #[test]
    fn test_invalid_date_format_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_invalid_date_format_not_saved() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.date_format = "%d/%m/%Y %Q".to_string();
        assert!(settings.save(&paths).is_err());
        assert!(!paths.is_initialized());

        settings.date_format = "%d %B %Y".to_string();
        settings.save(&paths).unwrap();
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.log_level, "warn");
    }
}
