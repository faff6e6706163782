//! Console events for communication between layers.
//!
//! Events are the primary mechanism for:
//! - UI -> Core: Submitted lines
//! - Core -> Host: Raw text input, visibility changes
//! - Host -> Core: Output to display

use bevy::prelude::*;

/// Log target used when console output is mirrored to the host log.
pub const CONSOLE_LOG_TARGET: &str = "ingame_console";

/// Event sent when a line is submitted from the input field.
///
/// The console classifies the line and either handles it (`help`, `clear`)
/// or relays it through [`ConsoleTextInputEvent`].
///
/// # Examples
///
/// ```ignore
/// fn submit(mut events: MessageWriter<ConsoleSubmitEvent>) {
///     events.write(ConsoleSubmitEvent::new("help"));
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSubmitEvent {
    /// The submitted line, exactly as typed.
    pub line: String,
}

impl ConsoleSubmitEvent {
    /// Create a new submit event.
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

/// Raw text typed into the console, published for the host to interpret.
///
/// Sent once for every non-empty submission that is not a toggle glyph,
/// before the console looks at it, so built-ins are included.
///
/// # Examples
///
/// ```ignore
/// fn handle_commands(mut events: MessageReader<ConsoleTextInputEvent>) {
///     for event in events.read() {
///         if event.text.starts_with("teleport") {
///             // ...
///         }
///     }
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleTextInputEvent {
    /// The submitted line, exactly as typed.
    pub text: String,
}

impl ConsoleTextInputEvent {
    /// Create a new text input event.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Event sent when output should be displayed in the console.
///
/// # Examples
///
/// ```ignore
/// fn log_to_console(mut events: MessageWriter<ConsoleOutputEvent>) {
///     events.write(ConsoleOutputEvent::info("Game started"));
///     events.write(ConsoleOutputEvent::error("Failed to load level"));
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq)]
pub struct ConsoleOutputEvent {
    /// The message text. May span several lines.
    pub message: String,
    /// The severity.
    pub level: ConsoleOutputLevel,
    /// Set for messages that came from the host log; they are not mirrored
    /// back to it.
    pub from_host_log: bool,
}

/// Severity of console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleOutputLevel {
    /// General information (white).
    #[default]
    Info,
    /// Warning (yellow).
    Warn,
    /// Error (red).
    Error,
}

impl ConsoleOutputLevel {
    /// Text color used for this level.
    pub fn color(self) -> Color {
        match self {
            ConsoleOutputLevel::Info => Color::WHITE,
            ConsoleOutputLevel::Warn => Color::srgb(1.0, 1.0, 0.0),
            ConsoleOutputLevel::Error => Color::srgb(1.0, 0.0, 0.0),
        }
    }

    /// Write `message` to the host log at the matching severity.
    pub fn mirror(self, message: &str) {
        match self {
            ConsoleOutputLevel::Info => info!(target: CONSOLE_LOG_TARGET, "{}", message),
            ConsoleOutputLevel::Warn => warn!(target: CONSOLE_LOG_TARGET, "{}", message),
            ConsoleOutputLevel::Error => error!(target: CONSOLE_LOG_TARGET, "{}", message),
        }
    }
}

impl ConsoleOutputEvent {
    /// Create a new output event.
    pub fn new(level: ConsoleOutputLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            from_host_log: false,
        }
    }

    /// Create an info message.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Info, message)
    }

    /// Create a warning message.
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Warn, message)
    }

    /// Create an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ConsoleOutputLevel::Error, message)
    }

    /// Create a message captured from the host log.
    pub fn captured(level: ConsoleOutputLevel, message: impl Into<String>) -> Self {
        Self {
            from_host_log: true,
            ..Self::new(level, message)
        }
    }

    /// Whether displaying this message also writes it to the host log.
    pub fn mirrors_to_log(&self, mirror_to_log: bool) -> bool {
        mirror_to_log && !self.from_host_log
    }
}

/// Event sent when the console is opened or closed.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleToggleEvent {
    /// Whether the console is now open.
    pub open: bool,
}

impl ConsoleToggleEvent {
    /// Create an event for opening the console.
    pub fn opened() -> Self {
        Self { open: true }
    }

    /// Create an event for closing the console.
    pub fn closed() -> Self {
        Self { open: false }
    }
}

/// Plugin that registers all console events.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleSubmitEvent>()
            .add_message::<ConsoleTextInputEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<ConsoleToggleEvent>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Records target and level of every event.
    #[derive(Clone, Default)]
    struct RecordedEvents(Arc<Mutex<Vec<(String, Level)>>>);

    impl<S: Subscriber> Layer<S> for RecordedEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let metadata = event.metadata();
            self.0
                .lock()
                .unwrap()
                .push((metadata.target().to_string(), *metadata.level()));
        }
    }

    #[test]
    fn test_console_output_event() {
        let event = ConsoleOutputEvent::error("Something went wrong");
        assert_eq!(event.level, ConsoleOutputLevel::Error);
        assert_eq!(event.message, "Something went wrong");
        assert!(!event.from_host_log);
    }

    #[test]
    fn test_captured_output_is_flagged() {
        let event = ConsoleOutputEvent::captured(ConsoleOutputLevel::Warn, "low memory");
        assert!(event.from_host_log);
        assert_eq!(event.level, ConsoleOutputLevel::Warn);
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(ConsoleOutputLevel::Info.color(), Color::WHITE);
        assert_eq!(ConsoleOutputLevel::Warn.color(), Color::srgb(1.0, 1.0, 0.0));
        assert_eq!(ConsoleOutputLevel::Error.color(), Color::srgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_toggle_event() {
        assert!(ConsoleToggleEvent::opened().open);
        assert!(!ConsoleToggleEvent::closed().open);
    }

    #[test]
    fn test_mirror_decision() {
        assert!(ConsoleOutputEvent::info("hi").mirrors_to_log(true));
        assert!(!ConsoleOutputEvent::info("hi").mirrors_to_log(false));

        let captured = ConsoleOutputEvent::captured(ConsoleOutputLevel::Info, "from log");
        assert!(!captured.mirrors_to_log(true));
        assert!(!captured.mirrors_to_log(false));
    }

    #[test]
    fn test_mirror_writes_to_console_target() {
        let recorded = RecordedEvents::default();
        let subscriber = tracing_subscriber::registry().with(recorded.clone());

        tracing::subscriber::with_default(subscriber, || {
            ConsoleOutputLevel::Info.mirror("hello");
            ConsoleOutputLevel::Warn.mirror("careful");
            ConsoleOutputLevel::Error.mirror("boom");
        });

        let events = recorded.0.lock().unwrap();
        assert_eq!(
            *events,
            [
                (CONSOLE_LOG_TARGET.to_string(), Level::INFO),
                (CONSOLE_LOG_TARGET.to_string(), Level::WARN),
                (CONSOLE_LOG_TARGET.to_string(), Level::ERROR),
            ]
        );
    }
}
