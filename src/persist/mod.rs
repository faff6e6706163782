//! RON settings files.
//!
//! The console settings can live in a RON file next to the game's other
//! configuration. Missing fields take their default values.

use std::fs;
use std::path::Path;

use crate::core::{ConsoleSettings, SettingsError};

/// Default settings file name.
pub const DEFAULT_SETTINGS_FILE: &str = "console_settings.ron";

impl ConsoleSettings {
    /// Load settings from a RON file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(path.display().to_string(), e.to_string()))?;

        let settings: Self = ron::from_str(&contents)
            .map_err(|e| SettingsError::Parse(path.display().to_string(), e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::Io(parent.display().to_string(), e.to_string()))?;
            }
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);

        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| SettingsError::Serialize(e.to_string()))?;

        fs::write(path, contents)
            .map_err(|e| SettingsError::Io(path.display().to_string(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_settings_file_roundtrip() {
        let settings = ConsoleSettings {
            toggle_key: KeyCode::F1,
            show_timestamps: false,
            max_messages: 200,
            background_color: Color::srgba(0.1, 0.2, 0.3, 0.9),
            ..default()
        };

        let temp = NamedTempFile::new().unwrap();
        settings.save(temp.path()).unwrap();

        let loaded = ConsoleSettings::load(temp.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ConsoleSettings::load("nonexistent_console_settings.ron");
        assert!(matches!(result, Err(SettingsError::Io(..))));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let ron_content = r#"(
    toggle_key: F2,
    max_messages: 10,
)"#;

        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(ron_content.as_bytes()).unwrap();
        temp.flush().unwrap();

        let settings = ConsoleSettings::load(temp.path()).unwrap();
        assert_eq!(settings.toggle_key, KeyCode::F2);
        assert_eq!(settings.max_messages, 10);
        assert_eq!(settings.max_input_length, 1000);
        assert!(settings.show_timestamps);
    }

    #[test]
    fn test_zero_capacity_in_file_is_rejected() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"(max_input_length: 0)").unwrap();
        temp.flush().unwrap();

        let result = ConsoleSettings::load(temp.path());
        assert_eq!(result, Err(SettingsError::ZeroCapacity("max_input_length")));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"(max_messages: \"lots\")").unwrap();
        temp.flush().unwrap();

        let result = ConsoleSettings::load(temp.path());
        assert!(matches!(result, Err(SettingsError::Parse(..))));
    }
}
