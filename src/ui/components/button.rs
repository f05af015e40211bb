//! Bordered buttons: the form's submit control and the view switcher entries

use crate::submission::SubmissionStatus;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// What the submit control can do right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    /// Accepts a submit attempt
    Ready,
    /// A request is in flight
    Busy,
    /// The form was sent; nothing left to do
    Done,
}

impl SubmitState {
    pub fn from_status(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Idle | SubmissionStatus::Error => Self::Ready,
            SubmissionStatus::Sending => Self::Busy,
            SubmissionStatus::Sent => Self::Done,
        }
    }

    fn label<'a>(&self, ready_label: &'a str) -> &'a str {
        match self {
            Self::Ready => ready_label,
            Self::Busy => "Sending...",
            Self::Done => "Sent ✓",
        }
    }

    fn text_style(&self, focused: bool) -> Style {
        match self {
            Self::Ready if focused => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Self::Ready => Style::default(),
            Self::Busy => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
            Self::Done => Style::default().fg(Color::Green),
        }
    }
}

/// Render the submit control of a form
pub fn render_submit_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    focused: bool,
    state: SubmitState,
) {
    let border_color = match state {
        SubmitState::Ready if focused => Color::Cyan,
        SubmitState::Busy => Color::Yellow,
        _ => Color::DarkGray,
    };

    let paragraph =
        Paragraph::new(format!(" {} ", state.label(label))).style(state.text_style(focused));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(paragraph.block(block), area);
}

/// Render a view switcher entry: function key, then the page name
pub fn render_nav_button(frame: &mut Frame, area: Rect, key: &str, label: &str, is_current: bool) {
    let (marker, label_style, border_color) = if is_current {
        (
            "▸",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            Color::Cyan,
        )
    } else {
        (" ", Style::default(), Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(label, label_style),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
