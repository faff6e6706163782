//! Unified console API for convenient access.
//!
//! The [`Console`] system parameter wraps the per-instance resources so game
//! code can write to the console without knowing whether one is registered.
//! Every method is a no-op when no console exists.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{
    ConsoleCommands, ConsoleOutputLevel, ConsoleSettings, ConsoleVisibility, MessageBuffer,
    MessageEntry,
};

/// Unified console system parameter for convenient access.
///
/// # Examples
///
/// ```ignore
/// fn on_player_death(mut console: Console) {
///     console.write_warning("Player died");
/// }
///
/// fn setup(mut console: Console) {
///     console.set_commands(["spawn", "kill"]);
/// }
/// ```
#[derive(SystemParam)]
pub struct Console<'w> {
    settings: Option<Res<'w, ConsoleSettings>>,
    buffer: Option<ResMut<'w, MessageBuffer>>,
    commands: Option<ResMut<'w, ConsoleCommands>>,
    visibility: Option<ResMut<'w, ConsoleVisibility>>,
}

impl Console<'_> {
    /// Whether a console is registered.
    pub fn exists(&self) -> bool {
        self.buffer.is_some()
    }

    /// Write an info line (white).
    pub fn write_line(&mut self, message: &str) {
        self.write(ConsoleOutputLevel::Info, message);
    }

    /// Write a warning line (yellow).
    pub fn write_warning(&mut self, message: &str) {
        self.write(ConsoleOutputLevel::Warn, message);
    }

    /// Write an error line (red).
    pub fn write_error(&mut self, message: &str) {
        self.write(ConsoleOutputLevel::Error, message);
    }

    /// Display a message at `level` and mirror it to the host log if enabled.
    pub fn write(&mut self, level: ConsoleOutputLevel, message: &str) {
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        buffer.display(message, level.color());
        if self.settings.as_ref().is_some_and(|s| s.mirror_to_log) {
            level.mirror(message);
        }
    }

    /// Display a message in an arbitrary color, without mirroring.
    pub fn display(&mut self, message: &str, color: Color) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.display(message, color);
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            buffer.clear();
        }
    }

    /// Replace the command names listed by `help`.
    pub fn set_commands<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(commands) = self.commands.as_mut() {
            **commands = ConsoleCommands::new(names);
        }
    }

    /// Command names listed by `help`.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().flat_map(|c| c.iter())
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &MessageEntry> {
        self.buffer.iter().flat_map(|b| b.iter())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the console panel is shown.
    pub fn is_visible(&self) -> bool {
        self.visibility.as_ref().is_some_and(|v| v.is_visible())
    }

    /// Show or hide the console panel.
    pub fn set_visible(&mut self, visible: bool) {
        if let Some(visibility) = self.visibility.as_mut() {
            visibility.set(visible);
        }
    }
}
