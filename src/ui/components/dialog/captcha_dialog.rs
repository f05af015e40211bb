//! Human-verification dialog

use super::base::{render_dialog, DialogConfig};
use crate::platform::PASTE_SHORTCUT;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// What the verification overlay shows
pub struct CaptchaDialog<'a> {
    /// Hosted challenge page for the configured site key
    pub challenge_link: Option<&'a str>,
    /// Token typed or pasted so far
    pub token_input: &'a str,
    /// Expired or failed challenge message
    pub error: Option<&'a str>,
    /// Token accepted and the request is in flight
    pub sending: bool,
}

/// Render the CAPTCHA overlay centered on the screen
pub fn render_captcha_dialog(frame: &mut Frame, dialog: CaptchaDialog) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut body = vec![Line::from(Span::styled(
        dialog.challenge_link.unwrap_or("Loading challenge..."),
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
    ))];
    body.push(Line::from(""));
    body.push(Line::from(vec![
        Span::raw("Token: "),
        Span::styled(dialog.token_input, Style::default().fg(Color::White)),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]));
    if dialog.sending {
        body.push(Line::from(""));
        body.push(Line::from(Span::styled(
            "Verified. Sending...",
            Style::default().fg(Color::Green),
        )));
    } else if let Some(error) = dialog.error {
        body.push(Line::from(""));
        body.push(Line::from(Span::styled(
            error,
            Style::default().fg(Color::Red),
        )));
    }

    let hint = vec![
        Span::styled("Enter", key_style),
        Span::raw(" verify  "),
        Span::styled(PASTE_SHORTCUT, key_style),
        Span::raw(" paste  "),
        Span::styled("Esc", key_style),
        Span::raw(" cancel"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Verify you are human",
            title_color: Color::Yellow,
            border_color: Color::Yellow,
            message: "Open this page, solve the challenge and paste the token it gives you:",
            body,
            hint: Some(hint),
            max_width: 72,
        },
    );
}
