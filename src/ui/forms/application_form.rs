//! Job application form rendering

use super::annotated_fields;
use super::field_renderer::FieldNote;
use super::form_view::{draw_form_view, FormView};
use crate::app::App;
use crate::state::{ApplicationForm, Attachment, Form, FormFocus};
use ratatui::{layout::Rect, Frame};

/// Draw the careers page
pub fn draw_application(frame: &mut Frame, area: Rect, app: &App) {
    let controller = &app.application;
    let form = controller.form();
    let content = &app.content.careers;

    let mut fields = annotated_fields(controller);
    if let Some((_, note)) = fields.get_mut(ApplicationForm::RESUME_FIELD) {
        *note = resume_note(form);
    }

    let active_field = match app.state.form_focus {
        FormFocus::Fields => Some(form.active_field()),
        FormFocus::SubmitButton => None,
    };

    let view = FormView {
        heading: &content.heading,
        intro: &content.intro,
        fields,
        active_field,
        submit_label: "Submit application",
        status: controller.status(),
        mode: app.state.layout_mode,
    };

    draw_form_view(frame, area, &view);
}

/// A rejected file is reported right away, without waiting for submit
fn resume_note(form: &ApplicationForm) -> Option<FieldNote> {
    if let Some(err) = &form.resume_error {
        return Some(FieldNote::Error(err.to_string()));
    }
    form.attached_resume().map(|a| FieldNote::Info(attached(a)))
}

fn attached(attachment: &Attachment) -> String {
    let kib = attachment.size.div_ceil(1024);
    format!("Attached {} ({kib} KiB)", attachment.file_name)
}
