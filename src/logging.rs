//! Custom [LogPlugin](bevy::log::LogPlugin) functionality.
//!
//! Captures host log events so they show up in the console. Lines the console
//! itself mirrors to the log (target [`CONSOLE_LOG_TARGET`]) are skipped.

use bevy::log::{BoxedLayer, Level};
use bevy::prelude::*;
use std::sync::mpsc;
use tracing::Subscriber;
use tracing_subscriber::field::Visit;
use tracing_subscriber::Layer;

use crate::core::{ConsoleOutputEvent, ConsoleOutputLevel, CONSOLE_LOG_TARGET};

/// A function that feeds host log events into the in-game console via
/// [`LogPlugin::custom_layer`](bevy::log::LogPlugin::custom_layer).
pub fn custom_log_layer(app: &mut App) -> Option<BoxedLayer> {
    Some(Box::new(create_custom_log_layer(app)))
}

fn create_custom_log_layer(app: &mut App) -> LogCaptureLayer {
    let (sender, receiver) = mpsc::channel();
    app.add_message::<ConsoleOutputEvent>();
    app.insert_non_send_resource(CapturedLogEvents(receiver));
    app.add_systems(PreUpdate, transfer_log_events);

    LogCaptureLayer { sender }
}

/// Map a log level to a console level. Debug and trace events are dropped.
pub fn console_level(level: Level) -> Option<ConsoleOutputLevel> {
    match level {
        Level::ERROR => Some(ConsoleOutputLevel::Error),
        Level::WARN => Some(ConsoleOutputLevel::Warn),
        Level::INFO => Some(ConsoleOutputLevel::Info),
        _ => None,
    }
}

/// Transfers captured events to [`MessageWriter<ConsoleOutputEvent>`](ConsoleOutputEvent).
fn transfer_log_events(
    receiver: NonSend<CapturedLogEvents>,
    mut output: MessageWriter<ConsoleOutputEvent>,
) {
    for event in receiver.0.try_iter() {
        output.write(event);
    }
}

/// Stores captured events until [`transfer_log_events`] runs.
struct CapturedLogEvents(mpsc::Receiver<ConsoleOutputEvent>);

/// A [`Layer`] that captures log events and sends them to [`CapturedLogEvents`].
struct LogCaptureLayer {
    sender: mpsc::Sender<ConsoleOutputEvent>,
}

impl<S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>> Layer<S>
    for LogCaptureLayer
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        if metadata.target() == CONSOLE_LOG_TARGET {
            return;
        }
        let Some(level) = console_level(*metadata.level()) else {
            return;
        };

        let mut message = None;
        event.record(&mut LogEventVisitor(&mut message));
        if let Some(message) = message {
            let _ = self.sender.send(ConsoleOutputEvent::captured(level, message));
        }
    }
}

/// A [`Visit`]or that records the `message` field of an event.
struct LogEventVisitor<'a>(&'a mut Option<String>);

impl Visit for LogEventVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // Only log out messages
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_level_mapping() {
        assert_eq!(console_level(Level::ERROR), Some(ConsoleOutputLevel::Error));
        assert_eq!(console_level(Level::WARN), Some(ConsoleOutputLevel::Warn));
        assert_eq!(console_level(Level::INFO), Some(ConsoleOutputLevel::Info));
        assert_eq!(console_level(Level::DEBUG), None);
        assert_eq!(console_level(Level::TRACE), None);
    }
}
