//! Layout components (sidebar, tab bar, status bar)

use super::components::{render_nav_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::{LayoutMode, View};
use crate::submission::SubmissionStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar items with their shortcut keys
const NAV_ITEMS: &[(&str, View)] = &[("F1", View::Contact), ("F2", View::Careers)];

/// Areas of one frame
pub struct FrameAreas {
    /// Sidebar in wide mode, one-line tab bar in compact mode
    pub nav: Rect,
    pub main: Rect,
}

/// Split the frame for the given layout mode, reserving the bottom line for
/// the status bar
pub fn create_layout(area: Rect, mode: LayoutMode) -> FrameAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    match mode {
        LayoutMode::Wide => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(16), // Sidebar
                    Constraint::Min(0),     // Main content
                ])
                .split(rows[0]);
            FrameAreas {
                nav: chunks[0],
                main: chunks[1],
            }
        }
        LayoutMode::Compact => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Tab bar
                    Constraint::Min(0),    // Main content
                ])
                .split(rows[0]);
            FrameAreas {
                nav: chunks[0],
                main: chunks[1],
            }
        }
    }
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(1)]; // Top padding
    constraints.extend(NAV_ITEMS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, (key, view)) in NAV_ITEMS.iter().enumerate() {
        render_nav_button(
            frame,
            chunks[idx + 1],
            key,
            view.label(),
            app.state.current_view == *view,
        );
    }
}

/// Draw the single-line tab bar used in compact mode
pub fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (key, view) in NAV_ITEMS {
        let style = if app.state.current_view == *view {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {key} {} ", view.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    // Submission status of the current form
    let status_dot = match app.current_status() {
        SubmissionStatus::Idle => Span::styled(" ○ ", Style::default().fg(Color::Gray)),
        SubmissionStatus::Sending => Span::styled(" ● ", Style::default().fg(Color::Yellow)),
        SubmissionStatus::Sent => Span::styled(" ● ", Style::default().fg(Color::Green)),
        SubmissionStatus::Error => Span::styled(" ● ", Style::default().fg(Color::Red)),
    };

    let mut spans = vec![
        status_dot,
        Span::styled(
            format!("{} ", get_view_hints(app)),
            Style::default().fg(Color::Gray),
        ),
    ];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_hint = " ^C:quit ";
    let quit_width = quit_hint.len() as u16;
    if area.width > quit_width {
        let quit_area = Rect {
            x: area.width - quit_width,
            y: area.height.saturating_sub(1),
            width: quit_width,
            height: 1,
        };
        let quit_widget =
            Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
        frame.render_widget(quit_widget, quit_area);
    }
}

/// Get keyboard hints for the current focus
fn get_view_hints(app: &App) -> String {
    if app.state.current_error().is_some() {
        return "Enter/Esc:dismiss".to_string();
    }
    if app.captcha_visible() {
        return format!(
            "Enter:verify  {}:paste  Esc:cancel",
            crate::platform::PASTE_SHORTCUT
        );
    }
    let submit = crate::platform::SUBMIT_SHORTCUT;
    match app.state.current_view {
        View::Contact => format!("Tab:next  Enter:newline in message  {submit}:send  F2:careers"),
        View::Careers => format!(
            "Tab:next  ←/→:vacancy  Enter:attach resume  {submit}:apply  F1:contact"
        ),
    }
}
