//! Contact form rendering

use super::annotated_fields;
use super::form_view::{draw_form_view, FormView};
use crate::app::App;
use crate::state::{Form, FormFocus};
use ratatui::{layout::Rect, Frame};

/// Draw the contact page
pub fn draw_contact(frame: &mut Frame, area: Rect, app: &App) {
    let controller = &app.contact;
    let content = &app.content.contact;

    let active_field = match app.state.form_focus {
        FormFocus::Fields => Some(controller.form().active_field()),
        FormFocus::SubmitButton => None,
    };

    let view = FormView {
        heading: &content.heading,
        intro: &content.intro,
        fields: annotated_fields(controller),
        active_field,
        submit_label: "Send message",
        status: controller.status(),
        mode: app.state.layout_mode,
    };

    draw_form_view(frame, area, &view);
}
