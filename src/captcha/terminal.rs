//! Terminal CAPTCHA widget
//!
//! The challenge itself is solved on the provider's hosted page. The widget
//! shows that page's address for the configured site key and accepts the
//! token it hands back, typed or pasted from the clipboard.

use super::traits::{CaptchaEvent, CaptchaEvents, CaptchaWidget};
use anyhow::Result;
use arboard::Clipboard;
use std::time::{Duration, Instant};

/// How long a rendered challenge stays valid
pub const TOKEN_TTL: Duration = Duration::from_secs(120);

pub struct TerminalCaptcha {
    challenge_url: String,
    site_key: Option<String>,
    events: Option<CaptchaEvents>,
    input: String,
    rendered_at: Option<Instant>,
    ttl: Duration,
}

impl TerminalCaptcha {
    pub fn new(challenge_url: impl Into<String>) -> Self {
        Self {
            challenge_url: challenge_url.into(),
            site_key: None,
            events: None,
            input: String::new(),
            rendered_at: None,
            ttl: TOKEN_TTL,
        }
    }

    #[cfg(test)]
    fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Address the user opens to solve the challenge
    pub fn challenge_link(&self) -> Option<String> {
        self.site_key
            .as_ref()
            .map(|key| format!("{}?sitekey={}", self.challenge_url, key))
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_active(&self) -> bool {
        self.events.is_some()
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_active() && !c.is_whitespace() {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Append the clipboard contents to the token input. A clipboard that
    /// can't be read fails the challenge so the overlay can say so.
    pub fn paste_from_clipboard(&mut self) {
        match read_clipboard() {
            Ok(text) => text.chars().for_each(|c| self.push_char(c)),
            Err(err) => self.fail(format!("clipboard unavailable ({err})")),
        }
    }

    /// Report a challenge that could not be completed
    pub fn fail(&self, reason: impl Into<String>) {
        let Some(events) = &self.events else {
            return;
        };
        if events.send(CaptchaEvent::Failed(reason.into())).is_err() {
            tracing::warn!("captcha listener dropped before failure was reported");
        }
    }

    /// Hand the entered token to whoever rendered the challenge
    pub fn confirm(&mut self) {
        let Some(events) = &self.events else {
            return;
        };
        let expired = self
            .rendered_at
            .is_some_and(|at| at.elapsed() > self.ttl);
        let event = if expired {
            CaptchaEvent::Expired
        } else {
            CaptchaEvent::Verified(self.input.trim().to_string())
        };
        if events.send(event).is_err() {
            tracing::warn!("captcha listener dropped before verification");
        }
        if expired {
            self.input.clear();
            self.rendered_at = Some(Instant::now());
        }
    }
}

fn read_clipboard() -> Result<String> {
    let mut clipboard = Clipboard::new()?;
    Ok(clipboard.get_text()?)
}

impl CaptchaWidget for TerminalCaptcha {
    fn render(&mut self, site_key: &str, events: CaptchaEvents) {
        self.site_key = Some(site_key.to_string());
        self.events = Some(events);
        self.input.clear();
        self.rendered_at = Some(Instant::now());
    }

    fn reset(&mut self) {
        self.events = None;
        self.input.clear();
        self.rendered_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_render_exposes_challenge_link() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut widget = TerminalCaptcha::new("https://challenges.example.com/solve");
        assert!(widget.challenge_link().is_none());
        widget.render("abc", tx);
        assert_eq!(
            widget.challenge_link().as_deref(),
            Some("https://challenges.example.com/solve?sitekey=abc")
        );
    }

    #[test]
    fn test_confirm_sends_token() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widget = TerminalCaptcha::new("https://c");
        widget.render("abc", tx);
        for c in "tok123".chars() {
            widget.push_char(c);
        }
        widget.confirm();
        assert_eq!(rx.try_recv().unwrap(), CaptchaEvent::Verified("tok123".to_string()));
    }

    #[test]
    fn test_confirm_after_ttl_sends_expired() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widget = TerminalCaptcha::new("https://c").with_ttl(Duration::ZERO);
        widget.render("abc", tx);
        widget.push_char('x');
        std::thread::sleep(Duration::from_millis(2));
        widget.confirm();
        assert_eq!(rx.try_recv().unwrap(), CaptchaEvent::Expired);
        assert_eq!(widget.input(), "");
    }

    #[test]
    fn test_input_ignored_until_rendered() {
        let mut widget = TerminalCaptcha::new("https://c");
        widget.push_char('x');
        assert_eq!(widget.input(), "");
    }

    #[test]
    fn test_reset_clears_token_and_listener() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widget = TerminalCaptcha::new("https://c");
        widget.render("abc", tx);
        widget.push_char('x');
        widget.reset();
        assert_eq!(widget.input(), "");
        assert!(!widget.is_active());
        widget.confirm();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_fail_reports_reason_to_listener() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widget = TerminalCaptcha::new("https://c");
        widget.render("abc", tx);
        widget.fail("clipboard unavailable");
        assert_eq!(
            rx.try_recv().unwrap(),
            CaptchaEvent::Failed("clipboard unavailable".to_string())
        );
    }

    #[test]
    fn test_fail_without_challenge_is_silent() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut widget = TerminalCaptcha::new("https://c");
        widget.render("abc", tx);
        widget.reset();
        widget.fail("clipboard unavailable");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_whitespace_is_not_part_of_token() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut widget = TerminalCaptcha::new("https://c");
        widget.render("abc", tx);
        widget.push_char(' ');
        widget.push_char('a');
        assert_eq!(widget.input(), "a");
    }
}
