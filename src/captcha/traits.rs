//! Trait abstraction for the CAPTCHA widget to enable mocking in tests

use tokio::sync::mpsc::UnboundedSender;

/// Outcome reported by a challenge widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptchaEvent {
    /// The challenge was solved; an empty token counts as not verified
    Verified(String),
    /// A previously issued token is no longer valid
    Expired,
    /// The widget failed to load or the challenge failed
    Failed(String),
}

/// Sending half handed to the widget in place of callbacks
pub type CaptchaEvents = UnboundedSender<CaptchaEvent>;

/// Challenge widget capability
#[cfg_attr(test, mockall::automock)]
pub trait CaptchaWidget: Send {
    /// Show a challenge for `site_key`; results are sent on `events`
    fn render(&mut self, site_key: &str, events: CaptchaEvents);

    /// Discard any token and cancel a pending solve
    fn reset(&mut self);
}
