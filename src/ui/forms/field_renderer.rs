//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Message shown under a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNote {
    /// Blocking validation error
    Error(String),
    /// Non-blocking hint such as a recommended minimum length
    Hint(String),
    /// Neutral status, e.g. the attached file
    Info(String),
}

impl FieldNote {
    fn color(&self) -> Color {
        match self {
            Self::Error(_) => Color::Red,
            Self::Hint(_) => Color::Yellow,
            Self::Info(_) => Color::Green,
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Error(s) | Self::Hint(s) | Self::Info(s) => s,
        }
    }
}

/// Rows a field needs: multiline fields grow, everything else is one line
pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline {
        6
    } else {
        3
    }
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    note: Option<&FieldNote>,
) {
    let border_color = match note {
        Some(FieldNote::Error(_)) => Color::Red,
        _ if is_active => Color::Cyan,
        _ => Color::DarkGray,
    };
    let cursor = if is_active { "▌" } else { "" };
    let cursor_style = Style::default().fg(Color::Cyan);

    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let content = if field.as_text().is_empty() {
        // Cursor goes before the placeholder so typing reads naturally
        Paragraph::new(Line::from(vec![
            Span::styled(cursor, cursor_style),
            Span::styled(
                field.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
    } else if field.is_multiline {
        let mut lines: Vec<Line> = field
            .as_text()
            .split('\n')
            .map(|l| Line::from(Span::styled(l, value_style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, cursor_style));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(field.display_value(), value_style),
            Span::styled(cursor, cursor_style),
        ]))
    };

    let mut block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if let Some(note) = note {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", note.text()),
            Style::default().fg(note.color()),
        )));
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a one-line keyboard help row
pub fn draw_help_text(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(keys.len() * 2);
    for (key, action) in keys {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {action}  ")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiline_fields_are_taller() {
        let single = FormField::text("name", "Name", false);
        let multi = FormField::text("message", "Message", true);
        assert!(field_height(&multi) > field_height(&single));
    }

    #[test]
    fn test_note_colors() {
        assert_eq!(FieldNote::Error("x".into()).color(), Color::Red);
        assert_eq!(FieldNote::Hint("x".into()).color(), Color::Yellow);
        assert_eq!(FieldNote::Info("x".into()).text(), "x");
    }
}
