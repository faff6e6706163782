//! Core console types with zero optional dependencies.
//!
//! This module provides the fundamental building blocks:
//! - [`ConsoleSettings`] - Configuration record
//! - [`MessageBuffer`] - Bounded scrollback with FIFO eviction
//! - [`classify`] - Routing of submitted lines
//! - [`ConsoleVisibility`] / [`ConsoleInputLine`] - Shown state and focus
//! - [`ConsoleWidgets`] - Panel layout
//! - [`spawn_console`] / [`dispose_console`] - Lifecycle
//! - [`Console`] - Unified system parameter for convenient access
//! - Events for communication between layers

mod settings;
mod buffer;
mod dispatch;
mod visibility;
mod layout;
mod events;
mod lifecycle;
mod console;

pub use settings::{
    ConsoleSettings, SettingsError,
    DEFAULT_TOGGLE_KEY, DEFAULT_MAX_MESSAGES, DEFAULT_MAX_INPUT_LENGTH,
};
pub use buffer::{MessageBuffer, MessageEntry, TIMESTAMP_FORMAT};
pub use dispatch::{
    classify, help_text, BuiltinCommand, ConsoleCommands, Submission,
    BUILTIN_COMMAND_NAMES, OVERFLOW_MESSAGE, TOGGLE_GLYPHS,
};
pub use visibility::{console_visible, ConsoleInputLine, ConsoleVisibility};
pub use layout::{ConsoleViewport, ConsoleWidgets, INPUT_HEIGHT, PANEL_MARGIN, SCROLLBAR_WIDTH};
pub use events::{
    ConsoleSubmitEvent, ConsoleTextInputEvent, ConsoleOutputEvent, ConsoleOutputLevel,
    ConsoleToggleEvent, ConsoleEventsPlugin, CONSOLE_LOG_TARGET,
};
pub use lifecycle::{
    spawn_console, cancel_console, dispose_console,
    console_alive, console_pending, console_ready,
    ConsoleId, ConsoleInstance, ConsoleLifecycle, ConsoleUiRoot,
};
pub(crate) use lifecycle::await_ui_root;
pub use console::Console;
