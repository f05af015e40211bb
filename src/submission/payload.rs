//! Wire payloads for the two submission endpoints

use crate::state::Attachment;
use serde::Serialize;

/// JSON body of the contact endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub position: String,
    pub message: String,
    pub captcha_token: String,
}

/// Multipart body of the application endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSubmission {
    pub job_title: String,
    pub name: String,
    pub email: String,
    pub confirm_email: String,
    pub phone: String,
    pub location: String,
    pub linked_in: String,
    pub message: String,
    pub captcha_token: String,
    pub resume: Option<Attachment>,
}

impl ApplicationSubmission {
    /// Text parts in wire order
    pub fn text_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("jobTitle", self.job_title.as_str()),
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("confirmEmail", self.confirm_email.as_str()),
            ("phone", self.phone.as_str()),
            ("location", self.location.as_str()),
            ("linkedIn", self.linked_in.as_str()),
            ("message", self.message.as_str()),
            ("captchaToken", self.captcha_token.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionPayload {
    Contact(ContactSubmission),
    Application(ApplicationSubmission),
}

impl SubmissionPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Contact(_) => "contact",
            Self::Application(_) => "application",
        }
    }

    pub fn captcha_token(&self) -> &str {
        match self {
            Self::Contact(c) => &c.captcha_token,
            Self::Application(a) => &a.captcha_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_contact_serializes_camel_case() {
        let submission = ContactSubmission {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "1234567".to_string(),
            company: String::new(),
            position: String::new(),
            message: "Hello there".to_string(),
            captcha_token: "tok".to_string(),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["captchaToken"], "tok");
        assert_eq!(json["company"], "");
        assert!(json.get("captcha_token").is_none());
    }

    #[test]
    fn test_payload_kind_and_token() {
        let payload = SubmissionPayload::Application(ApplicationSubmission {
            job_title: "Designer".to_string(),
            name: String::new(),
            email: String::new(),
            confirm_email: String::new(),
            phone: String::new(),
            location: String::new(),
            linked_in: String::new(),
            message: String::new(),
            captcha_token: "abc".to_string(),
            resume: None,
        });
        assert_eq!(payload.kind(), "application");
        assert_eq!(payload.captcha_token(), "abc");
    }
}
