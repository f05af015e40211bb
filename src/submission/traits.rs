//! Trait abstraction for the submission backend to enable mocking in tests

use super::payload::SubmissionPayload;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

/// Any reason a submission did not succeed. The controller does not
/// distinguish between them.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server responded with {0}")]
    Status(StatusCode),
    #[error("Could not read attachment: {0}")]
    Attachment(#[from] std::io::Error),
}

/// Trait for submission backend operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Post a verified submission; `Ok` only for a 2xx response
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), SubmissionError>;
}
