//! Classification of submitted console lines.
//!
//! The console owns only two commands, `help` and `clear`. Every other line is
//! relayed to the host as raw text; there is no "unknown command" error.

use bevy::prelude::*;

/// Single-character inputs treated as an echo of the toggle hotkey.
pub const TOGGLE_GLYPHS: [&str; 2] = ["`", "~"];

/// Message shown when a submitted line is too long.
pub const OVERFLOW_MESSAGE: &str = "Overflow detected..";

/// Names of the built-in commands, in help-listing order.
pub const BUILTIN_COMMAND_NAMES: [&str; 2] = ["Help", "Clear"];

/// A command handled by the console itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCommand {
    /// Print the list of available commands.
    Help,
    /// Remove every entry from the buffer.
    Clear,
}

impl BuiltinCommand {
    /// Match a lower-cased token against the built-in names.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "help" => Some(BuiltinCommand::Help),
            "clear" => Some(BuiltinCommand::Clear),
            _ => None,
        }
    }
}

/// How a submitted line is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Empty input or exactly a toggle glyph; nothing happens.
    Ignored,
    /// Longer than the configured maximum.
    Rejected {
        /// Length of the input in characters.
        length: usize,
    },
    /// Handled by the console.
    Builtin(BuiltinCommand),
    /// Left to external subscribers.
    Forward,
}

impl Submission {
    /// Whether subscribers are told about this line.
    ///
    /// Everything except ignored input is published, built-ins included.
    pub fn is_published(&self) -> bool {
        !matches!(self, Submission::Ignored)
    }
}

/// Classify one submitted line.
///
/// # Examples
///
/// ```
/// use bevy_ingame_console::core::{classify, BuiltinCommand, Submission};
///
/// assert_eq!(classify("CLEAR", 100), Submission::Builtin(BuiltinCommand::Clear));
/// assert_eq!(classify("teleport 10 20", 100), Submission::Forward);
/// assert_eq!(classify("~", 100), Submission::Ignored);
/// ```
pub fn classify(input: &str, max_input_length: usize) -> Submission {
    if input.is_empty() || TOGGLE_GLYPHS.iter().any(|glyph| *glyph == input) {
        return Submission::Ignored;
    }

    let length = input.chars().count();
    if length > max_input_length {
        return Submission::Rejected { length };
    }

    let cleaned = input.to_lowercase();
    match cleaned.split_whitespace().next().and_then(BuiltinCommand::from_token) {
        Some(builtin) => Submission::Builtin(builtin),
        None => Submission::Forward,
    }
}

/// Externally registered command names, listed by `help`.
///
/// The console never executes these; they only document what the host
/// handles through [`ConsoleTextInputEvent`](super::ConsoleTextInputEvent).
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleCommands(pub Vec<String>);

impl ConsoleCommands {
    /// Create from a list of names, keeping their order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Append a name.
    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    /// Iterate over names in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// The single line printed by `help`.
pub fn help_text(commands: &ConsoleCommands) -> String {
    let names: Vec<&str> = BUILTIN_COMMAND_NAMES
        .iter()
        .copied()
        .chain(commands.iter())
        .collect();
    format!("Available Commands : {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_inputs() {
        assert_eq!(classify("", 10), Submission::Ignored);
        assert_eq!(classify("`", 10), Submission::Ignored);
        assert_eq!(classify("~", 10), Submission::Ignored);
        assert!(!Submission::Ignored.is_published());
    }

    #[test]
    fn test_whitespace_and_padded_glyphs_are_forwarded() {
        assert_eq!(classify("   ", 10), Submission::Forward);
        assert_eq!(classify(" ` ", 10), Submission::Forward);
        assert_eq!(classify("~~", 10), Submission::Forward);
        assert!(classify("   ", 10).is_published());
        assert_eq!(classify("  clear  ", 10), Submission::Builtin(BuiltinCommand::Clear));
    }

    #[test]
    fn test_long_whitespace_overflows() {
        assert_eq!(classify(&" ".repeat(20), 8), Submission::Rejected { length: 20 });
    }

    #[test]
    fn test_builtins_are_case_insensitive() {
        assert_eq!(classify("clear", 10), Submission::Builtin(BuiltinCommand::Clear));
        assert_eq!(classify("CLEAR", 10), Submission::Builtin(BuiltinCommand::Clear));
        assert_eq!(classify("Help", 10), Submission::Builtin(BuiltinCommand::Help));
        assert_eq!(classify("help me", 10), Submission::Builtin(BuiltinCommand::Help));
    }

    #[test]
    fn test_no_partial_matching() {
        assert_eq!(classify("cle", 10), Submission::Forward);
        assert_eq!(classify("clearall", 10), Submission::Forward);
        assert_eq!(classify("helpme", 10), Submission::Forward);
    }

    #[test]
    fn test_unknown_commands_are_forwarded() {
        let submission = classify("teleport 10 20", 100);
        assert_eq!(submission, Submission::Forward);
        assert!(submission.is_published());
    }

    #[test]
    fn test_overflow_rejected() {
        assert_eq!(classify("clear", 4), Submission::Rejected { length: 5 });
        assert_eq!(classify("clear", 5), Submission::Builtin(BuiltinCommand::Clear));
        // Length counts characters, not bytes.
        assert_eq!(classify("ééé", 3), Submission::Forward);
        assert!(Submission::Rejected { length: 5 }.is_published());
    }

    #[test]
    fn test_help_text_lists_commands_in_order() {
        let commands = ConsoleCommands::new(["spawn", "kill"]);
        assert_eq!(help_text(&commands), "Available Commands : Help, Clear, spawn, kill");
        assert_eq!(help_text(&ConsoleCommands::default()), "Available Commands : Help, Clear");
    }
}
