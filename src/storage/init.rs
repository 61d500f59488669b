//! Storage initialization
//!
//! Handles first-run setup

use tracing::info;

use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::TrackerError;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and writes default settings if none exist.
/// Existing settings and data are left untouched.
pub fn initialize_storage(paths: &TrackerPaths) -> Result<Settings, TrackerError> {
    paths.ensure_directories()?;

    let settings = Settings::load_or_create(paths)?;
    if !paths.is_initialized() {
        settings.save(paths)?;
        info!(base_dir = %paths.base_dir().display(), "initialized storage");
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_settings_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();
        assert!(paths.is_initialized());
        assert!(paths.data_dir().exists());

        let mut settings = Settings::load_or_create(&paths).unwrap();
        settings.currency_symbol = "€".to_string();
        settings.save(&paths).unwrap();

        let again = initialize_storage(&paths).unwrap();
        assert_eq!(again.currency_symbol, "€");
    }
}
