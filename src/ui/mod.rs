//! The module that draws the console panel with egui.
//!
//! The panel follows the retained [`ConsoleWidgets`] layout: the message view
//! on top, the input field underneath, all inside a background panel.

use bevy::prelude::*;
use bevy_egui::*;

use crate::core::{
    ConsoleInputLine, ConsoleSettings, ConsoleSubmitEvent, ConsoleUiRoot, ConsoleViewport,
    ConsoleWidgets, MessageBuffer,
};

mod settings_panel;
pub use settings_panel::{settings_panel, SettingsEditor, SettingsEditorPlugin, INTEGRATION_HINT};

/// egui id of the console area.
pub const CONSOLE_AREA_ID: &str = "ingame_console";
/// egui id of the input field.
pub const CONSOLE_INPUT_ID: &str = "ingame_console_input";

/// Convert a Bevy color to an egui color.
pub fn to_color32(color: Color) -> egui::Color32 {
    let c = color.to_srgba();
    let [r, g, b, a] = [c.red, c.green, c.blue, c.alpha].map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Tag the primary egui context as the console's UI root.
pub(crate) fn tag_egui_root(
    mut commands: Commands,
    contexts: Query<Entity, (Added<PrimaryEguiContext>, Without<ConsoleUiRoot>)>,
) {
    for entity in &contexts {
        commands.entity(entity).insert(ConsoleUiRoot);
    }
}

/// Record the size of the egui screen for layout.
pub(crate) fn track_viewport(
    mut contexts: EguiContexts,
    mut viewport: ResMut<ConsoleViewport>,
) -> Result<(), BevyError> {
    let rect = contexts.ctx_mut()?.screen_rect();
    let size = Vec2::new(rect.width(), rect.height());
    if **viewport != size {
        **viewport = size;
    }
    Ok(())
}

pub(crate) fn render_console_system(
    mut contexts: EguiContexts,
    widgets: Res<ConsoleWidgets>,
    settings: Res<ConsoleSettings>,
    mut buffer: ResMut<MessageBuffer>,
    mut line: ResMut<ConsoleInputLine>,
    mut submits: MessageWriter<ConsoleSubmitEvent>,
) -> Result<(), BevyError> {
    let background = widgets.background;
    egui::Area::new(egui::Id::new(CONSOLE_AREA_ID))
        .fixed_pos(egui::pos2(background.min.x, background.min.y))
        .order(egui::Order::Foreground)
        .show(contexts.ctx_mut()?, |ui| {
            render_console(ui, &widgets, &settings, &mut buffer, &mut line, &mut submits)
        });
    Ok(())
}

fn size_of(rect: Rect) -> egui::Vec2 {
    egui::vec2(rect.width(), rect.height())
}

/// Draw the console panel into `ui`.
pub fn render_console(
    ui: &mut egui::Ui,
    widgets: &ConsoleWidgets,
    settings: &ConsoleSettings,
    buffer: &mut MessageBuffer,
    line: &mut ConsoleInputLine,
    submits: &mut MessageWriter<ConsoleSubmitEvent>,
) {
    egui::Frame::NONE
        .fill(to_color32(settings.background_color))
        .show(ui, |ui| {
            ui.set_min_size(size_of(widgets.background));
            ui.set_max_size(size_of(widgets.background));
            ui.spacing_mut().item_spacing.y = 0.0;

            egui::ScrollArea::vertical()
                .id_salt("ingame_console_messages")
                .min_scrolled_height(widgets.message_view.height())
                .max_height(widgets.message_view.height())
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_width(widgets.message_list.width());
                    add_entries(ui, buffer);
                });

            let input_id = egui::Id::new(CONSOLE_INPUT_ID);
            let response = egui::Frame::NONE
                .fill(to_color32(settings.input_background_color))
                .show(ui, |ui| {
                    ui.add_sized(
                        size_of(widgets.input),
                        egui::TextEdit::singleline(&mut line.text)
                            .id(input_id)
                            .frame(false)
                            .margin(egui::Vec2::new(4.0, 2.0)),
                    )
                })
                .inner;

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submits.write(ConsoleSubmitEvent::new(line.take_submission()));
            }
            if line.take_focus_request() {
                response.request_focus();
            }
            line.set_focused(response.has_focus());
        });
}

fn add_entries(ui: &mut egui::Ui, buffer: &mut MessageBuffer) {
    let scroll = buffer.take_scroll_request();
    let last = buffer.len().saturating_sub(1);

    for (index, entry) in buffer.iter().enumerate() {
        let text = egui::RichText::new(entry.rendered()).color(to_color32(entry.color));
        let label = ui.add(egui::Label::new(text).wrap());

        if scroll && index == last {
            label.scroll_to_me(Some(egui::Align::Max));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_color32(Color::WHITE), egui::Color32::WHITE);
        assert_eq!(
            to_color32(Color::srgba(1.0, 0.0, 0.0, 1.0)),
            egui::Color32::from_rgb(255, 0, 0)
        );
        assert_eq!(
            to_color32(Color::srgba(0.4, 0.4, 0.4, 0.6)),
            egui::Color32::from_rgba_unmultiplied(102, 102, 102, 153)
        );
    }
}
