//! Bounds of the console panel hierarchy.
//!
//! The hierarchy is: background panel, a column holding the message view and
//! the input field, and the message list inside the message view. All bounds
//! are in logical viewport pixels with the origin at the top-left corner.

use bevy::prelude::*;

/// Horizontal gap between the panel and each window edge.
pub const PANEL_MARGIN: f32 = 5.0;
/// Height of the input field.
pub const INPUT_HEIGHT: f32 = 20.0;
/// Width reserved for the message view's vertical scrollbar.
pub const SCROLLBAR_WIDTH: f32 = 14.0;

/// Last known size of the host viewport.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Deref, DerefMut)]
pub struct ConsoleViewport(pub Vec2);

impl Default for ConsoleViewport {
    fn default() -> Self {
        Self(Vec2::new(1280.0, 720.0))
    }
}

/// Retained panel hierarchy. Exists only while the console is ready.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ConsoleWidgets {
    /// Semi-transparent background panel.
    pub background: Rect,
    /// Column stacking the message view above the input field.
    pub column: Rect,
    /// Scrollable message view.
    pub message_view: Rect,
    /// List of message lines, narrowed by the scrollbar.
    pub message_list: Rect,
    /// Single-line input field.
    pub input: Rect,
}

impl ConsoleWidgets {
    /// Lay the hierarchy out for a viewport: full width minus margins, half
    /// the height.
    pub fn layout(viewport: Vec2) -> Self {
        let width = (viewport.x - 2.0 * PANEL_MARGIN).max(0.0);
        let height = (viewport.y / 2.0).max(0.0);
        let origin = Vec2::new(PANEL_MARGIN, 0.0);

        let background = Rect::from_corners(origin, origin + Vec2::new(width, height));
        let input_height = INPUT_HEIGHT.min(height);
        let view_height = height - input_height;

        let message_view = Rect::from_corners(origin, origin + Vec2::new(width, view_height));
        let message_list = Rect::from_corners(
            origin,
            origin + Vec2::new((width - SCROLLBAR_WIDTH).max(0.0), view_height),
        );
        let input_origin = origin + Vec2::new(0.0, view_height);
        let input = Rect::from_corners(input_origin, input_origin + Vec2::new(width, input_height));

        Self {
            background,
            column: background,
            message_view,
            message_list,
            input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_proportions() {
        let widgets = ConsoleWidgets::layout(Vec2::new(1280.0, 720.0));

        assert_eq!(widgets.background.min, Vec2::new(5.0, 0.0));
        assert_eq!(widgets.background.size(), Vec2::new(1270.0, 360.0));
        assert_eq!(widgets.message_view.size(), Vec2::new(1270.0, 340.0));
        assert_eq!(widgets.message_list.width(), 1270.0 - SCROLLBAR_WIDTH);
        assert_eq!(widgets.input.min, Vec2::new(5.0, 340.0));
        assert_eq!(widgets.input.size(), Vec2::new(1270.0, 20.0));
    }

    #[test]
    fn test_layout_tracks_resize() {
        let small = ConsoleWidgets::layout(Vec2::new(800.0, 600.0));
        let large = ConsoleWidgets::layout(Vec2::new(1920.0, 1080.0));
        assert_eq!(small.background.size(), Vec2::new(790.0, 300.0));
        assert_eq!(large.background.size(), Vec2::new(1910.0, 540.0));
    }

    #[test]
    fn test_tiny_viewport_does_not_go_negative() {
        let widgets = ConsoleWidgets::layout(Vec2::new(4.0, 10.0));
        assert_eq!(widgets.background.width(), 0.0);
        assert_eq!(widgets.input.height(), 5.0);
        assert_eq!(widgets.message_view.height(), 0.0);
    }
}
