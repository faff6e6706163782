//! Minimal console example without UI.
//!
//! Drives the console headless: output goes into the buffer, submitted lines
//! run the built-ins or come back as [`ConsoleTextInputEvent`]s.
//!
//! Run with: `cargo run --example minimal --no-default-features`

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy_ingame_console::prelude::*;
use bevy_ingame_console::MessageBuffer;
use std::time::Duration;

fn main() {
    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(16))))
        .add_plugins(bevy::log::LogPlugin::default())
        .add_plugins(IngameConsolePlugin::with_settings(ConsoleSettings {
            show_timestamps: false,
            ..default()
        }))
        .add_systems(Startup, setup)
        .add_systems(Update, (script, handle_commands, print_buffer).chain())
        .run();
}

fn setup(mut commands: Commands, mut console: Console) {
    // Without a UI the console still needs a root before it counts as ready.
    commands.spawn(ConsoleUiRoot);
    console.set_commands(["greet"]);
}

/// Feeds the console one line per frame, then exits.
fn script(
    mut frame: Local<usize>,
    mut output: MessageWriter<ConsoleOutputEvent>,
    mut submits: MessageWriter<ConsoleSubmitEvent>,
    mut exit: MessageWriter<AppExit>,
) {
    match *frame {
        0 => {
            output.write(ConsoleOutputEvent::info("Hello from the game"));
        }
        1 => {
            output.write(ConsoleOutputEvent::warn("Low health\nFind a medkit"));
        }
        2 => {
            submits.write(ConsoleSubmitEvent::new("help"));
        }
        3 => {
            submits.write(ConsoleSubmitEvent::new("greet world"));
        }
        4 => {
            submits.write(ConsoleSubmitEvent::new("clear"));
        }
        _ => {
            exit.write(AppExit::Success);
        }
    }
    *frame += 1;
}

fn handle_commands(mut input: MessageReader<ConsoleTextInputEvent>, mut console: Console) {
    for event in input.read() {
        if let Some(name) = event.text.strip_prefix("greet ") {
            console.write_line(&format!("Hello, {}!", name));
        }
    }
}

fn print_buffer(buffer: Option<Res<MessageBuffer>>) {
    let Some(buffer) = buffer else { return };
    if !buffer.is_changed() {
        return;
    }
    println!("--- {} entries ---", buffer.len());
    for entry in buffer.iter() {
        println!("{}", entry.rendered());
    }
}
