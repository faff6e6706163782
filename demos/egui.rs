//! Egui console example.
//!
//! Demonstrates the egui overlay with log capture and game-side commands.
//!
//! Run with: `cargo run --example egui`
//!
//! Controls:
//! - Press ` (grave/tilde) to toggle console
//! - Press Enter to focus the input and submit a line
//!
//! Try these commands:
//! - `help` - List all commands
//! - `clear` - Clear the scrollback
//! - `spawn` / `kill` - Spawn/despawn entities

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_ingame_console::prelude::*;
use bevy_ingame_console::SettingsEditorPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(LogPlugin {
            custom_layer: bevy_ingame_console::logging::custom_log_layer,
            ..default()
        }))
        .add_plugins(bevy_egui::EguiPlugin::default())
        .add_plugins(IngameConsolePlugin::default())
        .add_plugins(SettingsEditorPlugin { open: true, ..default() })
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_commands, log_toggles))
        .run();
}

/// Marker for demo entities.
#[derive(Component)]
struct DemoEntity;

fn setup(mut commands: Commands, mut console: Console) {
    commands.spawn(Camera2d);

    console.set_commands(["spawn", "kill"]);
    console.write_line("Welcome! Type 'help' for a list of commands.");
}

fn handle_commands(
    mut commands: Commands,
    mut input: MessageReader<ConsoleTextInputEvent>,
    mut console: Console,
    demo: Query<Entity, With<DemoEntity>>,
) {
    for event in input.read() {
        let command = event.text.trim().to_lowercase();
        match command.split_whitespace().next() {
            Some("spawn") => {
                let offset = demo.iter().count() as f32 * 60.0;
                commands.spawn((
                    Sprite {
                        color: Color::srgb(0.3, 0.7, 0.3),
                        custom_size: Some(Vec2::new(50.0, 50.0)),
                        ..default()
                    },
                    Transform::from_xyz(offset - 300.0, 0.0, 0.0),
                    DemoEntity,
                ));
                console.write_line("Spawned entity");
            }
            Some("kill") => {
                let count = demo.iter().count();
                for entity in &demo {
                    commands.entity(entity).despawn();
                }
                console.write_line(&format!("Killed {} entities", count));
            }
            Some("help") | Some("clear") | None => {}
            Some(other) => console.write_warning(&format!("Unknown command '{}'", other)),
        }
    }
}

fn log_toggles(mut toggles: MessageReader<ConsoleToggleEvent>) {
    for toggle in toggles.read() {
        info!("Console {}", if toggle.open { "opened" } else { "closed" });
    }
}
