//! Gated form submission
//!
//! A submit attempt runs the full validation pass first. Only a valid form
//! opens the CAPTCHA challenge, and only a verified token starts the network
//! call. Every retry after a failure goes through all three gates again with
//! a fresh token.
//!
//! The network call runs on its own task and reports back over a channel, so
//! the terminal keeps drawing and reading keys while a request is in flight.

use super::traits::{SubmissionClient, SubmissionError};
use crate::captcha::{CaptchaEvent, CaptchaWidget};
use crate::state::SubmissionForm;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

const CAPTCHA_EXPIRED: &str = "Verification expired, please try again";
const CAPTCHA_FAILED: &str = "Verification failed";

/// Submission lifecycle of one mounted form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Error,
}

impl SubmissionStatus {
    /// Page-level banner for the status
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            Self::Idle => None,
            Self::Sending => Some("Sending..."),
            Self::Sent => Some("Thank you! Your message has been sent."),
            Self::Error => Some("Error sending message, please try again"),
        }
    }
}

/// Overlay state of the CAPTCHA challenge
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaptchaState {
    pub visible: bool,
    pub token: Option<String>,
    pub error: Option<String>,
}

/// What a submit attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submit control is disabled while sending or after success
    Ignored,
    /// Validation failed; inline errors are now visible
    Blocked,
    /// Form is valid and the challenge is showing
    CaptchaOpened,
}

/// Result of one network call, tagged with the attempt that started it
struct Delivery {
    attempt: Uuid,
    result: Result<(), SubmissionError>,
}

pub struct FormController<F, C> {
    form: F,
    widget: C,
    client: Arc<dyn SubmissionClient>,
    site_key: String,
    events_tx: UnboundedSender<CaptchaEvent>,
    events_rx: UnboundedReceiver<CaptchaEvent>,
    results_tx: UnboundedSender<Delivery>,
    results_rx: UnboundedReceiver<Delivery>,
    in_flight: Option<Uuid>,
    status: SubmissionStatus,
    captcha: CaptchaState,
    submit_attempted: bool,
}

impl<F: SubmissionForm, C: CaptchaWidget> FormController<F, C> {
    pub fn new(
        form: F,
        widget: C,
        client: Arc<dyn SubmissionClient>,
        site_key: impl Into<String>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            form,
            widget,
            client,
            site_key: site_key.into(),
            events_tx,
            events_rx,
            results_tx,
            results_rx,
            in_flight: None,
            status: SubmissionStatus::Idle,
            captcha: CaptchaState::default(),
            submit_attempted: false,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn widget(&self) -> &C {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut C {
        &mut self.widget
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn captcha(&self) -> &CaptchaState {
        &self.captcha
    }

    /// Submit control is disabled while a request is in flight or after success
    pub fn can_submit(&self) -> bool {
        !matches!(self.status, SubmissionStatus::Sending | SubmissionStatus::Sent)
    }

    /// Inline error for a field, hidden until the first submit attempt
    pub fn visible_error(&self, name: &str) -> Option<String> {
        if !self.submit_attempted {
            return None;
        }
        self.form.field_error(name).map(|e| e.to_string())
    }

    /// User pressed submit
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Ignored;
        }

        self.submit_attempted = true;

        if !self.form.is_valid() {
            tracing::debug!("submit blocked by validation");
            return SubmitOutcome::Blocked;
        }

        self.captcha = CaptchaState {
            visible: true,
            token: None,
            error: None,
        };
        self.widget.render(&self.site_key, self.events_tx.clone());
        tracing::debug!("captcha challenge opened");
        SubmitOutcome::CaptchaOpened
    }

    /// User dismissed the challenge overlay
    pub fn cancel_captcha(&mut self) {
        self.widget.reset();
        self.captcha = CaptchaState::default();
    }

    /// Handle queued widget events and finished requests. Returns true if
    /// anything arrived.
    pub fn poll(&mut self) -> bool {
        let events = self.poll_captcha();
        let results = self.poll_submission();
        events || results
    }

    /// Handle every widget event queued so far
    pub fn poll_captcha(&mut self) -> bool {
        let mut handled = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_captcha_event(event);
            handled = true;
        }
        handled
    }

    /// Apply the result of a finished request, if one has come back
    pub fn poll_submission(&mut self) -> bool {
        let mut handled = false;
        while let Ok(delivery) = self.results_rx.try_recv() {
            self.finish(delivery);
            handled = true;
        }
        handled
    }

    /// Wait for the request in flight to come back and apply its result
    #[cfg(test)]
    pub async fn wait_for_submission(&mut self) {
        if self.in_flight.is_none() {
            return;
        }
        if let Some(delivery) = self.results_rx.recv().await {
            self.finish(delivery);
        }
    }

    pub fn handle_captcha_event(&mut self, event: CaptchaEvent) {
        if !self.captcha.visible || self.status == SubmissionStatus::Sending {
            tracing::debug!(?event, "ignoring captcha event outside an open challenge");
            return;
        }

        match event {
            CaptchaEvent::Verified(token) if !token.trim().is_empty() => {
                self.captcha.token = Some(token.clone());
                self.captcha.error = None;
                self.send(&token);
            }
            CaptchaEvent::Verified(_) | CaptchaEvent::Expired => {
                self.captcha.token = None;
                self.captcha.error = Some(CAPTCHA_EXPIRED.to_string());
            }
            CaptchaEvent::Failed(reason) => {
                tracing::warn!(%reason, "captcha challenge failed");
                self.captcha.token = None;
                self.captcha.error = Some(format!("{CAPTCHA_FAILED}: {reason}"));
            }
        }
    }

    fn send(&mut self, token: &str) {
        let attempt = Uuid::new_v4();
        let payload = self.form.payload(token);
        let kind = payload.kind();

        self.status = SubmissionStatus::Sending;
        self.in_flight = Some(attempt);
        tracing::info!(%attempt, form = kind, "sending submission");

        let client = Arc::clone(&self.client);
        let results = self.results_tx.clone();
        tokio::spawn(async move {
            let result = client.submit(payload).await;
            if results.send(Delivery { attempt, result }).is_err() {
                tracing::debug!(%attempt, "form closed before submission finished");
            }
        });
    }

    fn finish(&mut self, delivery: Delivery) {
        let Delivery { attempt, result } = delivery;
        if self.in_flight != Some(attempt) {
            tracing::debug!(%attempt, "ignoring result of a superseded submission");
            return;
        }
        self.in_flight = None;
        self.captcha.visible = false;
        self.captcha.token = None;

        match result {
            Ok(()) => {
                self.status = SubmissionStatus::Sent;
                tracing::info!(%attempt, "submission sent");
            }
            Err(err) => {
                self.status = SubmissionStatus::Error;
                self.widget.reset();
                tracing::warn!(%attempt, error = %err, "submission failed");
            }
        }
    }
}
