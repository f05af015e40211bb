//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::state::{LayoutMode, View};
use crate::submission::SubmissionStatus;
use components::{render_captcha_dialog, render_error_dialog, CaptchaDialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area(), app.state.layout_mode);

    match app.state.layout_mode {
        LayoutMode::Wide => layout::draw_sidebar(frame, areas.nav, app),
        LayoutMode::Compact => layout::draw_tab_bar(frame, areas.nav, app),
    }

    match app.state.current_view {
        View::Contact => forms::draw_contact(frame, areas.main, app),
        View::Careers => forms::draw_application(frame, areas.main, app),
    }

    layout::draw_status_bar(frame, app);

    if app.captcha_visible() {
        draw_captcha(frame, app);
    }

    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}

fn draw_captcha(frame: &mut Frame, app: &App) {
    let (widget, captcha) = match app.state.current_view {
        View::Contact => (app.contact.widget(), app.contact.captcha()),
        View::Careers => (app.application.widget(), app.application.captcha()),
    };
    let link = widget.challenge_link();

    render_captcha_dialog(
        frame,
        CaptchaDialog {
            challenge_link: link.as_deref(),
            token_input: widget.input(),
            error: captcha.error.as_deref(),
            sending: app.current_status() == SubmissionStatus::Sending,
        },
    );
}
