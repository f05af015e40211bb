//! Application state definitions

use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Contact,
    Careers,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contact => "Contact",
            Self::Careers => "Careers",
        }
    }
}

/// Focus within a form view (fields vs submit button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormFocus {
    #[default]
    Fields,
    SubmitButton,
}

impl FormFocus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Fields => Self::SubmitButton,
            Self::SubmitButton => Self::Fields,
        };
    }
}

/// Which rendering of the form the terminal size calls for. Both read and
/// write the same form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// Stacked single column for narrow or short terminals
    Compact,
    /// Form beside a side panel
    #[default]
    Wide,
}

impl LayoutMode {
    pub const MIN_WIDE_WIDTH: u16 = 100;
    pub const MIN_WIDE_HEIGHT: u16 = 30;

    pub fn for_size(width: u16, height: u16) -> Self {
        if width >= Self::MIN_WIDE_WIDTH && height >= Self::MIN_WIDE_HEIGHT {
            Self::Wide
        } else {
            Self::Compact
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub form_focus: FormFocus,

    // UI state
    pub layout_mode: LayoutMode,
    pub status_message: Option<String>,
    pub error_queue: VecDeque<String>,
}

impl AppState {
    /// Switch to another form view; each form keeps its own state
    pub fn navigate(&mut self, view: View) {
        if self.current_view != view {
            self.current_view = view;
            self.form_focus = FormFocus::Fields;
            self.status_message = None;
        }
    }

    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        tracing::warn!(%message, "surfacing error");
        self.error_queue.push_back(message);
    }

    /// Error currently shown, if any
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn update_layout(&mut self, width: u16, height: u16) {
        self.layout_mode = LayoutMode::for_size(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_contact() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Contact);
        assert_eq!(state.form_focus, FormFocus::Fields);
    }

    #[test]
    fn test_view_labels() {
        assert_eq!(View::Contact.label(), "Contact");
        assert_eq!(View::Careers.label(), "Careers");
    }

    #[test]
    fn test_navigate_resets_focus_and_status() {
        let mut state = AppState {
            form_focus: FormFocus::SubmitButton,
            status_message: Some("Resume attached".to_string()),
            ..Default::default()
        };
        state.navigate(View::Careers);
        assert_eq!(state.current_view, View::Careers);
        assert_eq!(state.form_focus, FormFocus::Fields);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_navigate_to_same_view_keeps_focus() {
        let mut state = AppState {
            form_focus: FormFocus::SubmitButton,
            ..Default::default()
        };
        state.navigate(View::Contact);
        assert_eq!(state.form_focus, FormFocus::SubmitButton);
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_layout_mode_thresholds() {
        assert_eq!(LayoutMode::for_size(120, 40), LayoutMode::Wide);
        assert_eq!(LayoutMode::for_size(99, 40), LayoutMode::Compact);
        assert_eq!(LayoutMode::for_size(120, 29), LayoutMode::Compact);
    }

    #[test]
    fn test_focus_toggle() {
        let mut focus = FormFocus::default();
        focus.toggle();
        assert_eq!(focus, FormFocus::SubmitButton);
        focus.toggle();
        assert_eq!(focus, FormFocus::Fields);
    }
}
