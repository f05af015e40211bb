//! Shared layout for the gated forms
//!
//! Wide terminals get the fields beside a side panel with the page copy and
//! the submit button. Compact terminals stack everything in one column. Both
//! read the same controller, so switching layouts never loses input.

use super::field_renderer::{draw_field, draw_help_text, field_height, FieldNote};
use crate::state::{FormField, LayoutMode};
use crate::submission::SubmissionStatus;
use crate::ui::components::{render_submit_button, SubmitState, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::ops::Range;

/// Everything needed to draw one form
pub struct FormView<'a> {
    pub heading: &'a str,
    pub intro: &'a str,
    pub fields: Vec<(&'a FormField, Option<FieldNote>)>,
    /// Focused field, `None` while the submit button has focus
    pub active_field: Option<usize>,
    pub submit_label: &'a str,
    pub status: SubmissionStatus,
    pub mode: LayoutMode,
}

pub fn draw_form_view(frame: &mut Frame, area: Rect, view: &FormView) {
    match view.mode {
        LayoutMode::Wide => draw_wide(frame, area, view),
        LayoutMode::Compact => draw_compact(frame, area, view),
    }
}

fn draw_wide(frame: &mut Frame, area: Rect, view: &FormView) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(34), // Side panel
        ])
        .split(area);

    let form_block = Block::default()
        .title(format!(" {} ", view.heading))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(focus_color(view.active_field.is_some())));
    let form_inner = form_block.inner(main_chunks[0]);
    frame.render_widget(form_block, main_chunks[0]);
    draw_fields(frame, form_inner, view);

    let panel_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(focus_color(view.active_field.is_none())));
    let panel_inner = panel_block.inner(main_chunks[1]);
    frame.render_widget(panel_block, main_chunks[1]);

    let panel_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // Intro copy
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(3),             // Status banner
            Constraint::Length(2),             // Help text
        ])
        .split(panel_inner);

    let intro = Paragraph::new(view.intro)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(intro, panel_chunks[0]);

    draw_submit(frame, panel_chunks[1], view);
    draw_banner(frame, panel_chunks[2], view.status);
    draw_help_text(
        frame,
        panel_chunks[3],
        &[("Tab", "next"), (crate::platform::SUBMIT_SHORTCUT, "submit")],
    );
}

fn draw_compact(frame: &mut Frame, area: Rect, view: &FormView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Heading
            Constraint::Min(3),                // Fields
            Constraint::Length(BUTTON_HEIGHT), // Submit and banner
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(Span::styled(
        view.heading,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(heading, chunks[0]);

    draw_fields(frame, chunks[1], view);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(0)])
        .split(chunks[2]);
    draw_submit(frame, bottom[0], view);
    draw_banner(frame, bottom[1], view.status);
}

/// Draw as many fields as fit, scrolled so the focused one is visible
fn draw_fields(frame: &mut Frame, area: Rect, view: &FormView) {
    let heights: Vec<u16> = view.fields.iter().map(|(f, _)| field_height(f)).collect();
    let active = view.active_field.unwrap_or(view.fields.len().saturating_sub(1));
    let range = visible_range(&heights, area.height, active);

    let mut constraints: Vec<Constraint> = heights[range.clone()]
        .iter()
        .map(|h| Constraint::Length(*h))
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, idx) in range.enumerate() {
        let (field, note) = &view.fields[idx];
        draw_field(
            frame,
            chunks[slot],
            field,
            view.active_field == Some(idx),
            note.as_ref(),
        );
    }
}

fn draw_submit(frame: &mut Frame, area: Rect, view: &FormView) {
    render_submit_button(
        frame,
        area,
        view.submit_label,
        view.active_field.is_none(),
        SubmitState::from_status(view.status),
    );
}

fn draw_banner(frame: &mut Frame, area: Rect, status: SubmissionStatus) {
    let Some(text) = status.banner() else {
        return;
    };
    let color = match status {
        SubmissionStatus::Sent => Color::Green,
        SubmissionStatus::Error => Color::Red,
        _ => Color::Yellow,
    };
    let banner = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    frame.render_widget(banner, area);
}

fn focus_color(focused: bool) -> Color {
    if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}

/// Indexes of the fields to draw in `available` rows, keeping `active` in view
pub fn visible_range(heights: &[u16], available: u16, active: usize) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    let fits_from = |start: usize| {
        let mut used = 0u16;
        let mut end = start;
        while end < heights.len() && used + heights[end] <= available {
            used += heights[end];
            end += 1;
        }
        end
    };

    let end = fits_from(0);
    if active < end {
        return 0..end;
    }

    // Walk back from the active field until the window is full
    let mut start = active;
    let mut used = heights[active];
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }
    start..(active + 1).max(fits_from(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_fits() {
        assert_eq!(visible_range(&[3, 3, 6], 20, 2), 0..3);
    }

    #[test]
    fn test_scrolls_to_active_field() {
        let heights = [3; 9];
        assert_eq!(visible_range(&heights, 12, 0), 0..4);
        assert_eq!(visible_range(&heights, 12, 8), 5..9);
        assert_eq!(visible_range(&heights, 12, 5), 2..6);
    }

    #[test]
    fn test_tiny_area_still_shows_active_field() {
        assert_eq!(visible_range(&[3, 6, 3], 2, 1), 1..2);
    }

    #[test]
    fn test_empty_form() {
        assert_eq!(visible_range(&[], 10, 0), 0..0);
    }
}
