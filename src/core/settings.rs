//! Console settings.
//!
//! A flat record loaded once, either passed inline to the plugin or read from
//! a RON file with the `persist` feature.

use bevy::prelude::*;
#[cfg(feature = "persist")]
use serde::{Deserialize, Serialize};

/// Default hotkey for opening and closing the console.
pub const DEFAULT_TOGGLE_KEY: KeyCode = KeyCode::Backquote;
/// Default number of entries kept in the scrollback.
pub const DEFAULT_MAX_MESSAGES: usize = 50;
/// Default maximum length (in characters) of a submitted line.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 1000;

/// Configuration of the in-game console.
///
/// Inserted once when the console is spawned and never mutated afterwards.
///
/// # Examples
///
/// ```ignore
/// App::new().add_plugins(IngameConsolePlugin::with_settings(ConsoleSettings {
///     toggle_key: KeyCode::F1,
///     max_messages: 200,
///     ..default()
/// }));
/// ```
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource)]
#[cfg_attr(feature = "persist", derive(Serialize, Deserialize), serde(default))]
pub struct ConsoleSettings {
    /// Key that opens and closes the console.
    pub toggle_key: KeyCode,
    /// Prefix new entries with an `[HH:MM:SS]` timestamp.
    pub show_timestamps: bool,
    /// Maximum number of entries kept before the oldest are evicted.
    pub max_messages: usize,
    /// Maximum number of characters accepted in a single submitted line.
    pub max_input_length: usize,
    /// Fill color of the console panel.
    pub background_color: Color,
    /// Fill color of the input field.
    pub input_background_color: Color,
    /// Also write every displayed message to the host log.
    pub mirror_to_log: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            toggle_key: DEFAULT_TOGGLE_KEY,
            show_timestamps: true,
            max_messages: DEFAULT_MAX_MESSAGES,
            max_input_length: DEFAULT_MAX_INPUT_LENGTH,
            background_color: Color::srgba(0.4, 0.4, 0.4, 0.6),
            input_background_color: Color::srgba(0.5, 0.5, 0.5, 0.6),
            mirror_to_log: true,
        }
    }
}

impl ConsoleSettings {
    /// Check the capacity invariants.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_messages == 0 {
            return Err(SettingsError::ZeroCapacity("max_messages"));
        }
        if self.max_input_length == 0 {
            return Err(SettingsError::ZeroCapacity("max_input_length"));
        }
        Ok(())
    }
}

/// Errors that can occur while loading, saving or validating settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// IO error (path, message).
    Io(String, String),
    /// Parse error (path, message).
    Parse(String, String),
    /// Serialization error.
    Serialize(String),
    /// A capacity field is zero.
    ZeroCapacity(&'static str),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(path, msg) => write!(f, "IO error for '{}': {}", path, msg),
            SettingsError::Parse(path, msg) => write!(f, "Parse error for '{}': {}", path, msg),
            SettingsError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            SettingsError::ZeroCapacity(field) => write!(f, "'{}' must be greater than zero", field),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = ConsoleSettings::default();
        assert_eq!(settings.toggle_key, KeyCode::Backquote);
        assert_eq!(settings.max_messages, 50);
        assert_eq!(settings.max_input_length, 1000);
        assert!(settings.show_timestamps);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let settings = ConsoleSettings { max_messages: 0, ..default() };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroCapacity("max_messages")));

        let settings = ConsoleSettings { max_input_length: 0, ..default() };
        assert_eq!(settings.validate(), Err(SettingsError::ZeroCapacity("max_input_length")));
    }

    #[test]
    fn test_error_display() {
        let err = SettingsError::ZeroCapacity("max_messages");
        assert_eq!(err.to_string(), "'max_messages' must be greater than zero");
    }
}
