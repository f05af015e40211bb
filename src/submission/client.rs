//! HTTP client for the site's submission endpoints
//!
//! Contact messages go out as JSON, applications as multipart with an
//! optional resume part. Any 2xx is success; the response body is ignored.

use super::payload::{ApplicationSubmission, ContactSubmission, SubmissionPayload};
use super::traits::{SubmissionClient, SubmissionError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

/// Client for posting form submissions
pub struct HttpSubmissionClient {
    client: Client,
    contact_url: String,
    application_url: String,
}

impl HttpSubmissionClient {
    /// Create a new submission client. No request timeout is set; the
    /// transport default applies.
    pub fn new(
        contact_url: impl Into<String>,
        application_url: impl Into<String>,
    ) -> Result<Self, SubmissionError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            contact_url: contact_url.into(),
            application_url: application_url.into(),
        })
    }

    async fn post_contact(&self, submission: &ContactSubmission) -> Result<(), SubmissionError> {
        let response = self
            .client
            .post(&self.contact_url)
            .json(submission)
            .send()
            .await?;
        ensure_success(response)
    }

    async fn post_application(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<(), SubmissionError> {
        let mut form = Form::new();
        for (name, value) in submission.text_fields() {
            form = form.text(name, value.to_string());
        }

        if let Some(resume) = &submission.resume {
            let bytes = tokio::fs::read(&resume.path).await?;
            let part = Part::bytes(bytes)
                .file_name(resume.file_name.clone())
                .mime_str(&resume.mime_type)?;
            form = form.part("resume", part);
        }

        let response = self
            .client
            .post(&self.application_url)
            .multipart(form)
            .send()
            .await?;
        ensure_success(response)
    }
}

fn ensure_success(response: Response) -> Result<(), SubmissionError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(SubmissionError::Status(status))
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), SubmissionError> {
        match payload {
            SubmissionPayload::Contact(contact) => self.post_contact(&contact).await,
            SubmissionPayload::Application(application) => {
                self.post_application(application).await
            }
        }
    }
}
