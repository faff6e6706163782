//! Editor-side panel for console settings.

#[cfg(feature = "persist")]
use std::path::PathBuf;

use bevy::prelude::*;
use bevy_egui::*;

use crate::core::ConsoleSettings;

/// Read-only snippet shown at the top of the settings panel.
pub const INTEGRATION_HINT: &str = "app.add_plugins(IngameConsolePlugin::default());";

/// Keys offered in the toggle key picker.
const TOGGLE_KEY_CHOICES: [KeyCode; 6] = [
    KeyCode::Backquote,
    KeyCode::Backslash,
    KeyCode::F1,
    KeyCode::F2,
    KeyCode::F12,
    KeyCode::Insert,
];

/// State of the settings editor window.
#[derive(Resource, Debug, Clone)]
pub struct SettingsEditor {
    /// Whether the window is shown.
    pub open: bool,
    /// Settings being edited.
    pub draft: ConsoleSettings,
    /// File the draft is saved to.
    #[cfg(feature = "persist")]
    pub path: PathBuf,
    /// Result of the last save.
    status: Option<String>,
}

impl SettingsEditor {
    /// Result of the last save, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Write the draft to its file.
    #[cfg(feature = "persist")]
    pub fn save(&mut self) -> Result<(), crate::core::SettingsError> {
        let result = self.draft.validate().and_then(|()| self.draft.save(&self.path));
        self.status = Some(match &result {
            Ok(()) => format!("Saved to '{}'", self.path.display()),
            Err(e) => e.to_string(),
        });
        result
    }
}

/// Plugin that adds the "Console Settings" editor window.
///
/// The window is meant for development builds; it edits a draft and, with the
/// `persist` feature, writes it to a settings file. A running console keeps
/// the settings it was spawned with. The window starts closed unless
/// [`open`](Self::open) is set; open it later through [`SettingsEditor::open`].
#[derive(Default)]
pub struct SettingsEditorPlugin {
    /// Show the window at startup.
    pub open: bool,
    /// File to load the draft from and save it to.
    #[cfg(feature = "persist")]
    pub path: Option<PathBuf>,
}

impl Plugin for SettingsEditorPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(feature = "persist")]
        let editor = {
            let path = self
                .path
                .clone()
                .unwrap_or_else(|| PathBuf::from(crate::persist::DEFAULT_SETTINGS_FILE));
            let draft = if path.exists() {
                ConsoleSettings::load(&path).unwrap_or_else(|e| {
                    warn!("Failed to load console settings, editing defaults: {}", e);
                    ConsoleSettings::default()
                })
            } else {
                ConsoleSettings::default()
            };
            SettingsEditor { open: self.open, draft, path, status: None }
        };
        #[cfg(not(feature = "persist"))]
        let editor = SettingsEditor {
            open: self.open,
            draft: ConsoleSettings::default(),
            status: None,
        };

        app.register_type::<ConsoleSettings>()
            .insert_resource(editor)
            .add_systems(
                EguiPrimaryContextPass,
                render_settings_editor.run_if(|e: Res<SettingsEditor>| e.open),
            );
    }
}

fn render_settings_editor(
    mut contexts: EguiContexts,
    mut editor: ResMut<SettingsEditor>,
) -> Result<(), BevyError> {
    let mut open = editor.open;
    egui::Window::new("Console Settings")
        .open(&mut open)
        .resizable(false)
        .show(contexts.ctx_mut()?, |ui| {
            settings_panel(ui, &mut editor.draft);

            #[cfg(feature = "persist")]
            {
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        if let Err(e) = editor.save() {
                            warn!("Failed to save console settings: {}", e);
                        }
                    }
                    ui.label(editor.path.display().to_string());
                });
            }

            if let Some(status) = editor.status() {
                ui.label(status);
            }
        });
    editor.open = open;
    Ok(())
}

/// Draw the settings form. Returns `true` if any field changed.
pub fn settings_panel(ui: &mut egui::Ui, settings: &mut ConsoleSettings) -> bool {
    let mut changed = false;

    ui.add_space(10.0);
    ui.label("[Information]");
    ui.label("Add the console plugin to your App:");
    let mut hint = INTEGRATION_HINT;
    ui.add(egui::TextEdit::singleline(&mut hint).desired_width(f32::INFINITY));
    ui.label("Then open the console in game with the toggle key.");
    ui.add_space(10.0);
    ui.label("[Settings]");

    egui::Grid::new("console_settings_grid")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Toggle key");
            egui::ComboBox::from_id_salt("console_toggle_key")
                .selected_text(format!("{:?}", settings.toggle_key))
                .show_ui(ui, |ui| {
                    for key in TOGGLE_KEY_CHOICES {
                        changed |= ui
                            .selectable_value(&mut settings.toggle_key, key, format!("{:?}", key))
                            .changed();
                    }
                });
            ui.end_row();

            ui.label("Show timestamps");
            changed |= ui.checkbox(&mut settings.show_timestamps, "").changed();
            ui.end_row();

            ui.label("Max messages");
            changed |= ui
                .add(egui::DragValue::new(&mut settings.max_messages).range(1..=10_000))
                .changed();
            ui.end_row();

            ui.label("Max input length");
            changed |= ui
                .add(egui::DragValue::new(&mut settings.max_input_length).range(1..=100_000))
                .changed();
            ui.end_row();

            ui.label("Background color");
            changed |= color_edit(ui, &mut settings.background_color);
            ui.end_row();

            ui.label("Input background color");
            changed |= color_edit(ui, &mut settings.input_background_color);
            ui.end_row();

            ui.label("Mirror to log");
            changed |= ui.checkbox(&mut settings.mirror_to_log, "").changed();
            ui.end_row();
        });

    changed
}

fn color_edit(ui: &mut egui::Ui, color: &mut Color) -> bool {
    let c = color.to_srgba();
    let mut rgba = [c.red, c.green, c.blue, c.alpha];
    let changed = ui.color_edit_button_rgba_unmultiplied(&mut rgba).changed();
    if changed {
        *color = Color::srgba(rgba[0], rgba[1], rgba[2], rgba[3]);
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "persist")]
    use tempfile::tempdir;

    #[test]
    fn test_editor_starts_closed() {
        let mut app = App::new();
        app.add_plugins(SettingsEditorPlugin::default());
        assert!(!app.world().resource::<SettingsEditor>().open);

        let mut app = App::new();
        app.add_plugins(SettingsEditorPlugin { open: true, ..default() });
        assert!(app.world().resource::<SettingsEditor>().open);
    }

    #[test]
    #[cfg(feature = "persist")]
    fn test_editor_saves_draft() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("console.ron");
        let mut editor = SettingsEditor {
            open: true,
            draft: ConsoleSettings { max_messages: 25, ..default() },
            path: path.clone(),
            status: None,
        };

        editor.save().unwrap();
        assert!(editor.status().unwrap().starts_with("Saved to"));
        assert_eq!(ConsoleSettings::load(&path).unwrap().max_messages, 25);
    }

    #[test]
    #[cfg(feature = "persist")]
    fn test_editor_refuses_invalid_draft() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("console.ron");
        let mut editor = SettingsEditor {
            open: true,
            draft: ConsoleSettings { max_messages: 0, ..default() },
            path: path.clone(),
            status: None,
        };

        assert!(editor.save().is_err());
        assert!(!path.exists());
        assert_eq!(editor.status(), Some("'max_messages' must be greater than zero"));
    }
}
