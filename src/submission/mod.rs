//! Form submission: controller, payloads and the HTTP backend

mod client;
mod controller;
mod payload;
mod traits;

pub use client::HttpSubmissionClient;
pub use controller::{FormController, SubmissionStatus, SubmitOutcome};
pub use payload::{ApplicationSubmission, ContactSubmission, SubmissionPayload};
pub use traits::{SubmissionClient, SubmissionError};

#[cfg(test)]
pub use traits::MockSubmissionClient;
