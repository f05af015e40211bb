//! Form domain layer
//!
//! This module provides the contact and application forms, their
//! validation rules and resume attachment handling.

mod attachment;
mod field;
mod form_state;
mod validation;

pub use attachment::{Attachment, AttachmentError, FileCandidate};
pub use field::FormField;
pub use form_state::{ApplicationForm, ContactForm, Form, SubmissionForm};
