//! Shown/hidden state and input-line focus.

use bevy::prelude::*;

/// Whether the console panel is shown. Hidden at startup.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleVisibility {
    visible: bool,
}

impl ConsoleVisibility {
    /// Whether the console is currently shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flip the state and return the new one.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Set the state, returning `true` if it changed.
    pub fn set(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }
}

/// Run condition: the console panel is shown.
pub fn console_visible(visibility: Option<Res<ConsoleVisibility>>) -> bool {
    visibility.is_some_and(|v| v.is_visible())
}

/// The text currently typed into the console input field.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleInputLine {
    /// Current contents of the input field.
    pub text: String,
    /// Whether the input field had keyboard focus last frame.
    pub(crate) focused: bool,
    /// One-shot request for the UI to focus the input field.
    pub(crate) focus_requested: bool,
}

impl ConsoleInputLine {
    /// Take the current text for submission, leaving the field empty.
    pub fn take_submission(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Whether the input field has keyboard focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Record the focus state reported by the UI.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Ask the UI to focus the input field on its next pass.
    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    /// Consume a pending focus request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Forget focus state, e.g. when the panel is hidden.
    pub(crate) fn reset_focus(&mut self) {
        self.focused = false;
        self.focus_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        assert!(!ConsoleVisibility::default().is_visible());
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut visibility = ConsoleVisibility::default();
        assert!(visibility.toggle());
        assert!(!visibility.toggle());
        assert_eq!(visibility, ConsoleVisibility::default());
    }

    #[test]
    fn test_set_reports_change() {
        let mut visibility = ConsoleVisibility::default();
        assert!(visibility.set(true));
        assert!(!visibility.set(true));
        assert!(visibility.is_visible());
    }

    #[test]
    fn test_take_submission_clears_text() {
        let mut line = ConsoleInputLine {
            text: "spawn 3".into(),
            ..default()
        };
        assert_eq!(line.take_submission(), "spawn 3");
        assert!(line.text.is_empty());
    }

    #[test]
    fn test_focus_request_is_one_shot() {
        let mut line = ConsoleInputLine::default();
        line.request_focus();
        assert!(line.take_focus_request());
        assert!(!line.take_focus_request());

        line.set_focused(true);
        line.request_focus();
        line.reset_focus();
        assert!(!line.is_focused());
        assert!(!line.take_focus_request());
    }
}
