//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `form_view`: Wide and compact layouts shared by both forms
//! - `contact_form`: Contact page
//! - `application_form`: Careers page

mod application_form;
mod contact_form;
mod field_renderer;
mod form_view;

pub use application_form::draw_application;
pub use contact_form::draw_contact;

use crate::captcha::CaptchaWidget;
use crate::state::{Form, FormField, SubmissionForm};
use crate::submission::FormController;
use field_renderer::FieldNote;

/// Pair every field with the note to show under it. Errors stay hidden
/// until the first submit attempt; hints show as soon as there is input.
fn annotated_fields<F, C>(controller: &FormController<F, C>) -> Vec<(&FormField, Option<FieldNote>)>
where
    F: Form + SubmissionForm,
    C: CaptchaWidget,
{
    let form = controller.form();
    (0..form.field_count())
        .filter_map(|idx| form.get_field(idx))
        .map(|field| {
            let note = controller
                .visible_error(field.name)
                .map(FieldNote::Error)
                .or_else(|| form.advisory(field.name).map(FieldNote::Hint));
            (field, note)
        })
        .collect()
}
