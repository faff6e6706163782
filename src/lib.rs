//! A togglable in-game developer console for Bevy.
//!
//! bevy_ingame_console provides:
//!
//! - **Message buffer**: bounded scrollback with timestamps and FIFO eviction
//! - **Dispatcher**: `help` and `clear` built in, everything else relayed to
//!   the game as [`ConsoleTextInputEvent`]
//! - **Overlay**: a half-screen panel toggled with a hotkey
//! - **Console**: Unified system parameter for writing to the console
//!
//! # Features
//!
//! - `egui` (default): egui overlay, settings editor window and log capture
//! - `persist`: RON settings files
//! - `full`: Enable egui + persist
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_ingame_console::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(bevy_egui::EguiPlugin::default())
//!         .add_plugins(IngameConsolePlugin::default())
//!         .add_systems(Startup, setup)
//!         .add_systems(Update, handle_commands)
//!         .run();
//! }
//!
//! fn setup(mut console: Console) {
//!     console.set_commands(["spawn", "kill"]);
//!     console.write_line("Console ready");
//! }
//!
//! fn handle_commands(mut input: MessageReader<ConsoleTextInputEvent>, mut console: Console) {
//!     for event in input.read() {
//!         if event.text.starts_with("spawn") {
//!             console.write_line("Spawned!");
//!         }
//!     }
//! }
//! ```

#[cfg(feature = "persist")]
use std::path::PathBuf;

use bevy::prelude::*;

// Core module (always available, zero optional deps)
pub mod core;

// Re-export core types at crate root for convenience
pub use crate::core::{
    Console,
    ConsoleSettings, SettingsError,
    MessageBuffer, MessageEntry,
    classify, help_text, BuiltinCommand, ConsoleCommands, Submission,
    ConsoleInputLine, ConsoleVisibility, ConsoleViewport, ConsoleWidgets,
    ConsoleSubmitEvent, ConsoleTextInputEvent, ConsoleOutputEvent, ConsoleOutputLevel,
    ConsoleToggleEvent, ConsoleEventsPlugin,
    spawn_console, cancel_console, dispose_console,
    ConsoleId, ConsoleInstance, ConsoleLifecycle, ConsoleUiRoot,
};

// UI modules (feature-gated)
#[cfg(feature = "egui")]
pub mod logging;
#[cfg(feature = "egui")]
pub mod ui;

// Settings files (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

#[cfg(feature = "egui")]
pub use ui::{SettingsEditor, SettingsEditorPlugin};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        Console,
        ConsoleSettings, ConsoleCommands,
        ConsoleSubmitEvent, ConsoleTextInputEvent, ConsoleOutputEvent, ConsoleOutputLevel,
        ConsoleToggleEvent,
        ConsoleUiRoot, ConsoleLifecycle,
        spawn_console, dispose_console,
    };
    pub use crate::{IngameConsolePlugin, SettingsSource};
}

/// Where the plugin gets its settings from.
#[derive(Debug, Clone)]
pub enum SettingsSource {
    /// Settings passed in code.
    Inline(ConsoleSettings),
    /// A RON settings file.
    #[cfg(feature = "persist")]
    File(PathBuf),
}

impl Default for SettingsSource {
    fn default() -> Self {
        SettingsSource::Inline(ConsoleSettings::default())
    }
}

impl SettingsSource {
    fn resolve(&self) -> Result<ConsoleSettings, SettingsError> {
        match self {
            SettingsSource::Inline(settings) => Ok(settings.clone()),
            #[cfg(feature = "persist")]
            SettingsSource::File(path) => ConsoleSettings::load(path),
        }
    }
}

/// System sets of the console, run in this order in [`Update`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleSystems {
    /// Waiting for the host UI root.
    Lifecycle,
    /// Hotkey toggle and input focus.
    Input,
    /// Submitted lines.
    Dispatch,
    /// Output messages into the buffer.
    Display,
    /// Panel bounds.
    Layout,
}

/// Main console plugin.
///
/// # Configuration
///
/// ```ignore
/// IngameConsolePlugin::default()
/// IngameConsolePlugin::with_settings(ConsoleSettings { max_messages: 200, ..default() })
/// IngameConsolePlugin::from_file("console_settings.ron") // `persist` feature
/// ```
///
/// If the settings cannot be loaded the error is logged once and the console
/// stays inert: only its message types are registered.
#[derive(Default)]
pub struct IngameConsolePlugin {
    /// Settings the console is spawned with.
    pub settings: SettingsSource,
}

impl IngameConsolePlugin {
    /// Use the given settings.
    pub fn with_settings(settings: ConsoleSettings) -> Self {
        Self {
            settings: SettingsSource::Inline(settings),
        }
    }

    /// Load settings from a RON file when the plugin is built.
    #[cfg(feature = "persist")]
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            settings: SettingsSource::File(path.into()),
        }
    }
}

impl Plugin for IngameConsolePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ConsoleEventsPlugin)
            .register_type::<ConsoleSettings>();

        let spawned = self
            .settings
            .resolve()
            .and_then(|settings| spawn_console(app.world_mut(), settings));
        if let Err(e) = spawned {
            error!("Missing console settings, in-game console disabled: {}", e);
            return;
        }
        info!("Loaded in-game console settings");

        app.configure_sets(
            Update,
            (
                ConsoleSystems::Lifecycle,
                ConsoleSystems::Input,
                ConsoleSystems::Dispatch,
                ConsoleSystems::Display,
                ConsoleSystems::Layout,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                core::await_ui_root
                    .in_set(ConsoleSystems::Lifecycle)
                    .run_if(core::console_pending),
                (toggle_visibility, request_input_focus)
                    .chain()
                    .in_set(ConsoleSystems::Input)
                    .run_if(core::console_ready),
                dispatch_submissions
                    .in_set(ConsoleSystems::Dispatch)
                    .run_if(core::console_alive),
                display_output
                    .in_set(ConsoleSystems::Display)
                    .run_if(core::console_alive),
                update_layout
                    .in_set(ConsoleSystems::Layout)
                    .run_if(core::console_ready.and(core::console_visible)),
            ),
        )
        .add_systems(Last, dispose_on_exit);

        // egui UI (feature-gated)
        #[cfg(feature = "egui")]
        {
            use bevy_egui::EguiPrimaryContextPass;

            app.add_systems(PreUpdate, ui::tag_egui_root)
                .add_systems(
                    EguiPrimaryContextPass,
                    (
                        ui::track_viewport,
                        ui::render_console_system
                            .run_if(core::console_ready.and(core::console_visible)),
                    )
                        .chain()
                        .run_if(core::console_alive),
                );
        }
    }
}

/// System that flips visibility when the toggle key is pressed.
fn toggle_visibility(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    settings: Res<ConsoleSettings>,
    mut visibility: ResMut<ConsoleVisibility>,
    mut line: ResMut<ConsoleInputLine>,
    mut toggles: MessageWriter<ConsoleToggleEvent>,
) {
    let Some(keys) = keys else { return };
    if !keys.just_pressed(settings.toggle_key) {
        return;
    }

    let open = visibility.toggle();
    line.reset_focus();
    toggles.write(if open {
        ConsoleToggleEvent::opened()
    } else {
        ConsoleToggleEvent::closed()
    });
}

/// System that asks the UI to focus the input field when Enter is pressed.
fn request_input_focus(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    visibility: Res<ConsoleVisibility>,
    mut line: ResMut<ConsoleInputLine>,
) {
    let Some(keys) = keys else { return };
    if visibility.is_visible() && keys.just_pressed(KeyCode::Enter) && !line.is_focused() {
        line.request_focus();
    }
}

/// System that classifies submitted lines and runs the built-ins.
fn dispatch_submissions(
    mut submits: MessageReader<ConsoleSubmitEvent>,
    mut text_input: MessageWriter<ConsoleTextInputEvent>,
    settings: Res<ConsoleSettings>,
    commands: Res<ConsoleCommands>,
    mut buffer: ResMut<MessageBuffer>,
) {
    for submit in submits.read() {
        let submission = classify(&submit.line, settings.max_input_length);
        if !submission.is_published() {
            continue;
        }

        // Subscribers see the raw line before the console interprets it.
        text_input.write(ConsoleTextInputEvent::new(submit.line.clone()));

        match submission {
            Submission::Rejected { length } => {
                debug!(
                    "Rejected console input of {} characters (max {})",
                    length, settings.max_input_length
                );
                buffer.display(core::OVERFLOW_MESSAGE, ConsoleOutputLevel::Error.color());
            }
            Submission::Builtin(BuiltinCommand::Clear) => buffer.clear(),
            Submission::Builtin(BuiltinCommand::Help) => {
                buffer.display(&help_text(&commands), ConsoleOutputLevel::Info.color());
            }
            Submission::Forward | Submission::Ignored => {}
        }
    }
}

/// System that moves output events into the buffer.
fn display_output(
    mut outputs: MessageReader<ConsoleOutputEvent>,
    settings: Res<ConsoleSettings>,
    mut buffer: ResMut<MessageBuffer>,
) {
    for output in outputs.read() {
        buffer.display(&output.message, output.level.color());
        if output.mirrors_to_log(settings.mirror_to_log) {
            output.level.mirror(&output.message);
        }
    }
}

/// System that keeps the panel sized to the viewport while visible.
fn update_layout(viewport: Res<ConsoleViewport>, widgets: Option<ResMut<ConsoleWidgets>>) {
    let Some(mut widgets) = widgets else { return };
    let layout = ConsoleWidgets::layout(**viewport);
    if *widgets != layout {
        *widgets = layout;
    }
}

/// System that tears the console down when the app exits.
fn dispose_on_exit(mut exits: MessageReader<AppExit>, mut commands: Commands) {
    if exits.read().count() > 0 {
        commands.queue(dispose_console);
    }
}
