//! Contact and application forms

use super::attachment::{validate_file, Attachment, AttachmentError, FileCandidate};
use super::field::FormField;
use super::validation::{
    self, check_field, FieldConstraint, FieldError, FieldFormat, ValidationResult,
};
use crate::content::{CareersContent, ContactContent};
use crate::submission::{ApplicationSubmission, ContactSubmission, SubmissionPayload};
use std::path::Path;

/// Trait for field navigation
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Validation and payload building shared by every gated form
pub trait SubmissionForm {
    /// Every field checked by the full-form pass
    fn validated_fields(&self) -> &'static [&'static str];

    /// First failing rule for a field, `None` when valid
    fn field_error(&self, name: &str) -> Option<FieldError>;

    /// Non-blocking hint for a field
    fn advisory(&self, _name: &str) -> Option<String> {
        None
    }

    /// Build the wire payload for a verified submission
    fn payload(&self, captcha_token: &str) -> SubmissionPayload;

    /// Error message for a field, `""` when valid
    fn get_error(&self, name: &str) -> String {
        self.field_error(name)
            .map(|e| e.to_string())
            .unwrap_or_default()
    }

    fn validate(&self) -> ValidationResult {
        self.validated_fields()
            .iter()
            .map(|name| (*name, self.get_error(name)))
            .collect()
    }

    /// Recomputed on every call
    fn is_valid(&self) -> bool {
        self.validated_fields()
            .iter()
            .all(|name| self.field_error(name).is_none())
    }
}

fn lookup(table: &[(&str, FieldConstraint)], name: &str) -> Option<FieldConstraint> {
    table.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

// Contact Form

const CONTACT_CONSTRAINTS: &[(&str, FieldConstraint)] = &[
    ("name", FieldConstraint::required(100).with_min_length(2)),
    (
        "email",
        FieldConstraint::required(254).with_format(FieldFormat::Email),
    ),
    (
        "phone",
        FieldConstraint::required(32).with_format(FieldFormat::Phone),
    ),
    ("company", FieldConstraint::optional(100)),
    ("position", FieldConstraint::optional(100)),
    ("message", FieldConstraint::required(2000).with_min_length(10)),
];

const CONTACT_FIELDS: &[&str] = &["name", "email", "phone", "company", "position", "message"];

#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub company: FormField,
    pub position: FormField,
    pub message: FormField,
    pub active_field_index: usize,
}

impl ContactForm {
    pub fn new(content: &ContactContent) -> Self {
        let placeholder = |name: &str| content.placeholder(name);
        Self {
            name: FormField::text("name", "Name", false).with_placeholder(placeholder("name")),
            email: FormField::text("email", "Email", false).with_placeholder(placeholder("email")),
            phone: FormField::text("phone", "Phone", false).with_placeholder(placeholder("phone")),
            company: FormField::text("company", "Company", false)
                .with_placeholder(placeholder("company")),
            position: FormField::text("position", "Position", false)
                .with_placeholder(placeholder("position")),
            message: FormField::text("message", "Message", true)
                .with_placeholder(placeholder("message")),
            active_field_index: 0,
        }
    }

    fn value(&self, name: &str) -> &str {
        match name {
            "name" => self.name.as_text(),
            "email" => self.email.as_text(),
            "phone" => self.phone.as_text(),
            "company" => self.company.as_text(),
            "position" => self.position.as_text(),
            "message" => self.message.as_text(),
            _ => "",
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(&ContactContent::default())
    }
}

impl Form for ContactForm {
    fn field_count(&self) -> usize {
        6
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(5);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.email,
            2 => &mut self.phone,
            3 => &mut self.company,
            4 => &mut self.position,
            _ => &mut self.message,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.phone),
            3 => Some(&self.company),
            4 => Some(&self.position),
            5 => Some(&self.message),
            _ => None,
        }
    }
}

impl SubmissionForm for ContactForm {
    fn validated_fields(&self) -> &'static [&'static str] {
        CONTACT_FIELDS
    }

    fn field_error(&self, name: &str) -> Option<FieldError> {
        let constraint = lookup(CONTACT_CONSTRAINTS, name)?;
        check_field(self.value(name), &constraint)
    }

    fn advisory(&self, name: &str) -> Option<String> {
        let constraint = lookup(CONTACT_CONSTRAINTS, name)?;
        validation::advisory(self.value(name), &constraint)
    }

    fn payload(&self, captcha_token: &str) -> SubmissionPayload {
        SubmissionPayload::Contact(ContactSubmission {
            name: self.name.as_text().trim().to_string(),
            email: self.email.as_text().trim().to_string(),
            phone: self.phone.as_text().trim().to_string(),
            company: self.company.as_text().trim().to_string(),
            position: self.position.as_text().trim().to_string(),
            message: self.message.as_text().trim().to_string(),
            captcha_token: captcha_token.to_string(),
        })
    }
}

// Application Form

const APPLICATION_CONSTRAINTS: &[(&str, FieldConstraint)] = &[
    ("name", FieldConstraint::required(100).with_min_length(2)),
    (
        "email",
        FieldConstraint::required(254).with_format(FieldFormat::Email),
    ),
    (
        "confirmEmail",
        FieldConstraint::required(254).with_format(FieldFormat::Email),
    ),
    (
        "phone",
        FieldConstraint::required(32).with_format(FieldFormat::Phone),
    ),
    ("location", FieldConstraint::required(100)),
    (
        "linkedIn",
        FieldConstraint::optional(300).with_format(FieldFormat::Url),
    ),
    ("message", FieldConstraint::optional(3000)),
];

const APPLICATION_FIELDS: &[&str] = &[
    "jobTitle",
    "name",
    "email",
    "confirmEmail",
    "phone",
    "location",
    "linkedIn",
    "message",
];

#[derive(Debug, Clone)]
pub struct ApplicationForm {
    pub job_title: FormField,
    pub name: FormField,
    pub email: FormField,
    pub confirm_email: FormField,
    pub phone: FormField,
    pub location: FormField,
    pub linked_in: FormField,
    pub message: FormField,
    /// Path input for the resume picker; cleared when a file is rejected
    pub resume_path: FormField,
    pub resume: Option<Attachment>,
    /// Why the last picked file was rejected
    pub resume_error: Option<AttachmentError>,
    pub vacancies: Vec<String>,
    pub active_field_index: usize,
}

impl ApplicationForm {
    pub fn new(content: &CareersContent) -> Self {
        let placeholder = |name: &str| content.placeholder(name);
        Self {
            job_title: FormField::choice("jobTitle", "Vacancy")
                .with_placeholder(placeholder("jobTitle")),
            name: FormField::text("name", "Name", false).with_placeholder(placeholder("name")),
            email: FormField::text("email", "Email", false).with_placeholder(placeholder("email")),
            confirm_email: FormField::text("confirmEmail", "Confirm Email", false)
                .with_placeholder(placeholder("confirmEmail")),
            phone: FormField::text("phone", "Phone", false).with_placeholder(placeholder("phone")),
            location: FormField::text("location", "Location", false)
                .with_placeholder(placeholder("location")),
            linked_in: FormField::text("linkedIn", "LinkedIn URL", false)
                .with_placeholder(placeholder("linkedIn")),
            message: FormField::text("message", "Message", true)
                .with_placeholder(placeholder("message")),
            resume_path: FormField::text("resume", "Resume (path to PDF/DOC/DOCX)", false)
                .with_placeholder(placeholder("resume")),
            resume: None,
            resume_error: None,
            vacancies: content.vacancies.clone(),
            active_field_index: 0,
        }
    }

    /// Index of the resume path field
    pub const RESUME_FIELD: usize = 8;

    fn value(&self, name: &str) -> &str {
        match name {
            "jobTitle" => self.job_title.as_text(),
            "name" => self.name.as_text(),
            "email" => self.email.as_text(),
            "confirmEmail" => self.confirm_email.as_text(),
            "phone" => self.phone.as_text(),
            "location" => self.location.as_text(),
            "linkedIn" => self.linked_in.as_text(),
            "message" => self.message.as_text(),
            _ => "",
        }
    }

    /// Validate a picked file and store it in the single attachment slot.
    /// A rejected file empties the slot and the path input.
    pub fn attach_resume(&mut self, candidate: FileCandidate) -> Result<(), AttachmentError> {
        match validate_file(candidate) {
            Ok(attachment) => {
                self.resume_path.set_text(attachment.path.display().to_string());
                self.resume = Some(attachment);
                self.resume_error = None;
                Ok(())
            }
            Err(err) => self.reject_resume(err),
        }
    }

    /// Inspect the file named in the path input and attach it
    pub fn attach_resume_from_path(&mut self) -> Result<(), AttachmentError> {
        let raw = self.resume_path.as_text().trim().to_string();
        if raw.is_empty() {
            self.resume = None;
            self.resume_error = None;
            return Ok(());
        }
        match FileCandidate::inspect(Path::new(&raw)) {
            Ok(candidate) => self.attach_resume(candidate),
            Err(err) => self.reject_resume(AttachmentError::Unreadable(err.to_string())),
        }
    }

    fn reject_resume(&mut self, err: AttachmentError) -> Result<(), AttachmentError> {
        self.resume = None;
        self.resume_path.set_text("");
        self.resume_error = Some(err.clone());
        Err(err)
    }

    /// Empty the attachment slot after the path input was edited
    pub fn detach_resume(&mut self) {
        if self.resume.take().is_some() {
            tracing::debug!("resume path edited, attachment dropped");
        }
        self.resume_error = None;
    }

    /// The attached file, as long as the path input still names it
    pub fn attached_resume(&self) -> Option<&Attachment> {
        let path = self.resume_path.as_text().trim();
        self.resume
            .as_ref()
            .filter(|attachment| attachment.path == Path::new(path))
    }

    pub fn has_resume(&self) -> bool {
        self.attached_resume().is_some()
    }

    fn job_title_error(&self) -> Option<FieldError> {
        let selected = self.job_title.as_text();
        if selected.trim().is_empty() {
            Some(FieldError::NoVacancy)
        } else if !self.vacancies.iter().any(|v| v == selected) {
            Some(FieldError::UnknownVacancy)
        } else {
            None
        }
    }
}

impl Default for ApplicationForm {
    fn default() -> Self {
        Self::new(&CareersContent::default())
    }
}

impl Form for ApplicationForm {
    fn field_count(&self) -> usize {
        9
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(8);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.job_title,
            1 => &mut self.name,
            2 => &mut self.email,
            3 => &mut self.confirm_email,
            4 => &mut self.phone,
            5 => &mut self.location,
            6 => &mut self.linked_in,
            7 => &mut self.message,
            _ => &mut self.resume_path,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.job_title),
            1 => Some(&self.name),
            2 => Some(&self.email),
            3 => Some(&self.confirm_email),
            4 => Some(&self.phone),
            5 => Some(&self.location),
            6 => Some(&self.linked_in),
            7 => Some(&self.message),
            8 => Some(&self.resume_path),
            _ => None,
        }
    }
}

impl SubmissionForm for ApplicationForm {
    fn validated_fields(&self) -> &'static [&'static str] {
        APPLICATION_FIELDS
    }

    fn field_error(&self, name: &str) -> Option<FieldError> {
        match name {
            "jobTitle" => self.job_title_error(),
            "confirmEmail" => {
                let constraint = lookup(APPLICATION_CONSTRAINTS, name)?;
                check_field(self.confirm_email.as_text(), &constraint).or_else(|| {
                    let email = self.email.as_text().trim().to_lowercase();
                    let confirm = self.confirm_email.as_text().trim().to_lowercase();
                    (email != confirm).then_some(FieldError::EmailMismatch)
                })
            }
            "linkedIn" => {
                if self.linked_in.as_text().trim().is_empty() {
                    return (!self.has_resume()).then_some(FieldError::LinkedInOrResume);
                }
                let constraint = lookup(APPLICATION_CONSTRAINTS, name)?;
                check_field(self.linked_in.as_text(), &constraint)
            }
            _ => {
                let constraint = lookup(APPLICATION_CONSTRAINTS, name)?;
                check_field(self.value(name), &constraint)
            }
        }
    }

    fn advisory(&self, name: &str) -> Option<String> {
        let constraint = lookup(APPLICATION_CONSTRAINTS, name)?;
        validation::advisory(self.value(name), &constraint)
    }

    fn payload(&self, captcha_token: &str) -> SubmissionPayload {
        SubmissionPayload::Application(ApplicationSubmission {
            job_title: self.job_title.as_text().to_string(),
            name: self.name.as_text().trim().to_string(),
            email: self.email.as_text().trim().to_string(),
            confirm_email: self.confirm_email.as_text().trim().to_string(),
            phone: self.phone.as_text().trim().to_string(),
            location: self.location.as_text().trim().to_string(),
            linked_in: self.linked_in.as_text().trim().to_string(),
            message: self.message.as_text().trim().to_string(),
            captcha_token: captcha_token.to_string(),
            resume: self.attached_resume().cloned(),
        })
    }
}
