//! Application state and core logic

use crate::captcha::TerminalCaptcha;
use crate::config::ResolvedConfig;
use crate::content::PageContent;
use crate::state::{AppState, ApplicationForm, ContactForm, Form, FormFocus, View};
use crate::submission::{
    FormController, HttpSubmissionClient, SubmissionClient, SubmissionStatus, SubmitOutcome,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

pub type ContactController = FormController<ContactForm, TerminalCaptcha>;
pub type ApplicationController = FormController<ApplicationForm, TerminalCaptcha>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Page copy for both forms
    pub content: PageContent,
    /// Contact form controller
    pub contact: ContactController,
    /// Job application form controller
    pub application: ApplicationController,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &ResolvedConfig) -> Result<Self> {
        let content = PageContent::load(config.content_path.as_deref())?;
        let client =
            HttpSubmissionClient::new(config.contact_url.clone(), config.application_url.clone())?;
        Ok(Self::with_client(
            content,
            Arc::new(client),
            &config.captcha_site_key,
            &config.captcha_url,
        ))
    }

    /// Build an App around any submission backend
    pub fn with_client(
        content: PageContent,
        client: Arc<dyn SubmissionClient>,
        site_key: &str,
        challenge_url: &str,
    ) -> Self {
        let contact = FormController::new(
            ContactForm::new(&content.contact),
            TerminalCaptcha::new(challenge_url),
            Arc::clone(&client),
            site_key,
        );
        let application = FormController::new(
            ApplicationForm::new(&content.careers),
            TerminalCaptcha::new(challenge_url),
            client,
            site_key,
        );

        Self {
            state: AppState::default(),
            content,
            contact,
            application,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Pick the layout matching the terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.state.update_layout(width, height);
    }

    /// Whether the CAPTCHA overlay of the current form is showing
    pub fn captcha_visible(&self) -> bool {
        match self.state.current_view {
            View::Contact => self.contact.captcha().visible,
            View::Careers => self.application.captcha().visible,
        }
    }

    /// Status of the current form
    pub fn current_status(&self) -> SubmissionStatus {
        match self.state.current_view {
            View::Contact => self.contact.status(),
            View::Careers => self.application.status(),
        }
    }

    /// Deliver CAPTCHA results and finished requests to their controllers
    pub fn poll(&mut self) {
        let contact = self.contact.poll();
        let application = self.application.poll();
        if contact || application {
            self.state.status_message = None;
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        if self.captcha_visible() {
            self.handle_captcha_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::F(1) => self.state.navigate(View::Contact),
            KeyCode::F(2) => self.state.navigate(View::Careers),
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('s') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit_current();
            }
            _ => match self.state.form_focus {
                FormFocus::SubmitButton => self.handle_submit_button_key(key),
                FormFocus::Fields => self.handle_field_key(key),
            },
        }
        Ok(())
    }

    /// Keys while the verification overlay is open
    fn handle_captcha_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => match self.state.current_view {
                View::Contact => self.contact.cancel_captcha(),
                View::Careers => self.application.cancel_captcha(),
            },
            KeyCode::Enter => {
                self.current_widget_mut().confirm();
                self.poll();
            }
            KeyCode::Backspace => self.current_widget_mut().pop_char(),
            KeyCode::Char('v') if key.modifiers.contains(crate::platform::PASTE_MODIFIER) => {
                self.current_widget_mut().paste_from_clipboard();
                self.poll();
            }
            KeyCode::Char(c) => self.current_widget_mut().push_char(c),
            _ => {}
        }
    }

    fn current_widget_mut(&mut self) -> &mut TerminalCaptcha {
        match self.state.current_view {
            View::Contact => self.contact.widget_mut(),
            View::Careers => self.application.widget_mut(),
        }
    }

    fn handle_submit_button_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.submit_current(),
            KeyCode::Tab | KeyCode::Down => {
                self.state.form_focus.toggle();
                self.focus_field(0);
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Esc => {
                self.state.form_focus.toggle();
                self.focus_field(usize::MAX);
            }
            _ => {}
        }
    }

    fn handle_field_key(&mut self, key: KeyEvent) {
        let view = self.state.current_view;
        let moved_past_end = match view {
            View::Contact => edit_form(self.contact.form_mut(), key, &[]),
            View::Careers => edit_form(
                self.application.form_mut(),
                key,
                &self.content.careers.vacancies,
            ),
        };

        if moved_past_end {
            self.state.form_focus = FormFocus::SubmitButton;
            return;
        }

        if view != View::Careers
            || self.application.form().active_field_index != ApplicationForm::RESUME_FIELD
        {
            return;
        }
        match key.code {
            KeyCode::Enter => self.attach_resume(),
            KeyCode::Char(_) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.application.form_mut().detach_resume()
            }
            KeyCode::Backspace => self.application.form_mut().detach_resume(),
            _ => {}
        }
    }

    /// Focus a field of the current form; out-of-range indexes clamp to the last
    fn focus_field(&mut self, index: usize) {
        match self.state.current_view {
            View::Contact => self.contact.form_mut().set_active_field(index),
            View::Careers => self.application.form_mut().set_active_field(index),
        }
    }

    fn attach_resume(&mut self) {
        let form = self.application.form_mut();
        match form.attach_resume_from_path() {
            Ok(()) => {
                self.state.status_message = form
                    .resume
                    .as_ref()
                    .map(|r| format!("Attached {}", r.file_name));
            }
            Err(err) => {
                self.state.status_message = Some(format!("Resume rejected: {err}"));
            }
        }
    }

    /// Run the submit gate for the current form
    fn submit_current(&mut self) {
        let outcome = match self.state.current_view {
            View::Contact => self.contact.submit(),
            View::Careers => self.application.submit(),
        };

        self.state.status_message = match outcome {
            SubmitOutcome::Ignored => None,
            SubmitOutcome::Blocked => Some("Please fix the highlighted fields".to_string()),
            SubmitOutcome::CaptchaOpened => None,
        };
    }
}

/// Apply a key to the focused field. Returns true when Tab moves past the
/// last field.
fn edit_form<F: Form>(form: &mut F, key: KeyEvent, options: &[String]) -> bool {
    let last = form.field_count() - 1;
    match key.code {
        KeyCode::Tab | KeyCode::Down if form.active_field() == last => return true,
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left | KeyCode::Right => {
            let field = form.get_active_field_mut();
            if field.is_choice() {
                field.cycle_choice(options, key.code == KeyCode::Right);
            }
        }
        KeyCode::Backspace => form.get_active_field_mut().pop_char(),
        KeyCode::Enter => {
            let field = form.get_active_field_mut();
            if field.is_multiline {
                field.push_char('\n');
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.get_active_field_mut().push_char(c)
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CareersContent;
    use crate::submission::{MockSubmissionClient, SubmissionError, SubmissionPayload};
    use async_trait::async_trait;

    /// Backend that never answers
    struct StalledClient;

    #[async_trait]
    impl SubmissionClient for StalledClient {
        async fn submit(&self, _payload: SubmissionPayload) -> Result<(), SubmissionError> {
            std::future::pending().await
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn app_with(client: MockSubmissionClient) -> App {
        let content = PageContent {
            careers: CareersContent {
                vacancies: vec!["Designer".to_string(), "Rust Engineer".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        App::with_client(content, Arc::new(client), "site-key", "https://c")
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn fill_contact(app: &mut App) {
        for value in [
            "Ada Lovelace",
            "ada@example.com",
            "(123) 456-7890",
            "Engines",
            "Founder",
        ] {
            type_text(app, value);
            app.handle_key(key(KeyCode::Tab)).unwrap();
        }
        type_text(app, "Hello, we have a project.");
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_function_keys_switch_views() {
            let mut app = app_with(MockSubmissionClient::new());
            app.handle_key(key(KeyCode::F(2))).unwrap();
            assert_eq!(app.state.current_view, View::Careers);
            app.handle_key(key(KeyCode::F(1))).unwrap();
            assert_eq!(app.state.current_view, View::Contact);
        }

        #[test]
        fn test_tab_past_last_field_focuses_submit() {
            let mut app = app_with(MockSubmissionClient::new());
            for _ in 0..5 {
                app.handle_key(key(KeyCode::Tab)).unwrap();
            }
            assert_eq!(app.state.form_focus, FormFocus::Fields);
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(app.state.form_focus, FormFocus::SubmitButton);
        }

        #[test]
        fn test_ctrl_q_quits() {
            let mut app = app_with(MockSubmissionClient::new());
            app.handle_key(ctrl('q')).unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_forms_keep_state_across_views() {
            let mut app = app_with(MockSubmissionClient::new());
            type_text(&mut app, "Ada");
            app.handle_key(key(KeyCode::F(2))).unwrap();
            app.handle_key(key(KeyCode::F(1))).unwrap();
            assert_eq!(app.contact.form().name.as_text(), "Ada");
        }

        #[test]
        fn test_resize_selects_layout() {
            let mut app = app_with(MockSubmissionClient::new());
            app.resize(80, 24);
            assert_eq!(app.state.layout_mode, crate::state::LayoutMode::Compact);
            app.resize(140, 45);
            assert_eq!(app.state.layout_mode, crate::state::LayoutMode::Wide);
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_fills_active_field() {
            let mut app = app_with(MockSubmissionClient::new());
            type_text(&mut app, "Ada");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.contact.form().name.as_text(), "Ad");
        }

        #[test]
        fn test_enter_in_message_adds_newline() {
            let mut app = app_with(MockSubmissionClient::new());
            app.handle_key(key(KeyCode::BackTab)).unwrap();
            type_text(&mut app, "a");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.contact.form().message.as_text(), "a\n");
        }

        #[test]
        fn test_arrows_cycle_vacancies() {
            let mut app = app_with(MockSubmissionClient::new());
            app.handle_key(key(KeyCode::F(2))).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            assert_eq!(app.application.form().job_title.as_text(), "Rust Engineer");
        }

        #[test]
        fn test_enter_on_resume_field_reports_rejection() {
            let mut app = app_with(MockSubmissionClient::new());
            app.handle_key(key(KeyCode::F(2))).unwrap();
            app.handle_key(key(KeyCode::BackTab)).unwrap();
            type_text(&mut app, "/no/such/file.pdf");
            app.handle_key(key(KeyCode::Enter)).unwrap();

            let form = app.application.form();
            assert!(form.resume.is_none());
            assert!(form.resume_error.is_some());
            assert_eq!(form.resume_path.as_text(), "");
            assert!(app
                .state
                .status_message
                .as_deref()
                .is_some_and(|m| m.starts_with("Resume rejected")));
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_blocked_submit_sets_hint_and_shows_errors() {
            let mut client = MockSubmissionClient::new();
            client.expect_submit().never();
            let mut app = app_with(client);

            app.handle_key(ctrl('s')).unwrap();

            assert!(!app.captcha_visible());
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Please fix the highlighted fields")
            );
            assert_eq!(app.contact.visible_error("name").as_deref(), Some("Required"));
        }

        #[tokio::test]
        async fn test_full_flow_through_overlay() {
            let mut client = MockSubmissionClient::new();
            client
                .expect_submit()
                .withf(|p| p.captcha_token() == "tok123")
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(client);

            fill_contact(&mut app);
            app.handle_key(ctrl('s')).unwrap();
            assert!(app.captcha_visible());

            type_text(&mut app, "tok123");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.current_status(), SubmissionStatus::Sending);

            app.contact.wait_for_submission().await;
            assert_eq!(app.current_status(), SubmissionStatus::Sent);
            assert!(!app.captcha_visible());
        }

        #[tokio::test]
        async fn test_stalled_backend_keeps_keys_flowing() {
            let mut app = App::with_client(
                PageContent::default(),
                Arc::new(StalledClient),
                "site-key",
                "https://c",
            );

            fill_contact(&mut app);
            app.handle_key(ctrl('s')).unwrap();
            type_text(&mut app, "tok");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            tokio::task::yield_now().await;
            app.poll();

            assert_eq!(app.current_status(), SubmissionStatus::Sending);
            assert!(!app.contact.can_submit());

            // The overlay can still be closed and the app quit mid-request
            app.handle_key(key(KeyCode::Esc)).unwrap();
            app.handle_key(ctrl('s')).unwrap();
            assert!(!app.captcha_visible());
            assert_eq!(app.current_status(), SubmissionStatus::Sending);
            app.handle_key(ctrl('q')).unwrap();
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_edited_resume_path_is_not_submitted() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("cv.pdf");
            std::fs::write(&path, b"%PDF-1.7 resume").unwrap();

            let mut client = MockSubmissionClient::new();
            client
                .expect_submit()
                .withf(|p| match p {
                    SubmissionPayload::Application(a) => a.resume.is_none(),
                    _ => false,
                })
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(client);
            app.handle_key(key(KeyCode::F(2))).unwrap();
            app.handle_key(key(KeyCode::Right)).unwrap();
            for value in [
                "Grace Hopper",
                "grace@example.com",
                "grace@example.com",
                "5550109999",
                "Arlington",
                "https://linkedin.com/in/grace",
            ] {
                app.handle_key(key(KeyCode::Tab)).unwrap();
                type_text(&mut app, value);
            }
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Tab)).unwrap();
            assert_eq!(
                app.application.form().active_field_index,
                ApplicationForm::RESUME_FIELD
            );

            type_text(&mut app, &path.display().to_string());
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.application.form().has_resume());

            type_text(&mut app, "x");
            assert!(app.application.form().resume.is_none());

            app.handle_key(ctrl('s')).unwrap();
            type_text(&mut app, "tok");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.application.wait_for_submission().await;
            assert_eq!(app.current_status(), SubmissionStatus::Sent);
        }

        #[test]
        fn test_captcha_failure_stays_inside_overlay() {
            let mut app = app_with(MockSubmissionClient::new());
            fill_contact(&mut app);
            app.handle_key(ctrl('s')).unwrap();

            app.contact.widget().fail("clipboard unavailable");
            app.poll();

            assert!(app.captcha_visible());
            assert!(app.state.current_error().is_none());
            assert_eq!(
                app.contact.captcha().error.as_deref(),
                Some("Verification failed: clipboard unavailable")
            );
        }

        #[test]
        fn test_escape_cancels_overlay_without_sending() {
            let mut client = MockSubmissionClient::new();
            client.expect_submit().never();
            let mut app = app_with(client);

            fill_contact(&mut app);
            app.handle_key(ctrl('s')).unwrap();
            type_text(&mut app, "tok");
            app.handle_key(key(KeyCode::Esc)).unwrap();

            assert!(!app.captcha_visible());
            assert_eq!(app.current_status(), SubmissionStatus::Idle);
            assert_eq!(app.contact.widget().input(), "");
        }

        #[test]
        fn test_error_dialog_swallows_keys_until_dismissed() {
            let mut app = app_with(MockSubmissionClient::new());
            app.push_error("Clipboard unavailable");
            type_text(&mut app, "x");
            assert_eq!(app.contact.form().name.as_text(), "");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.state.current_error().is_none());
        }
    }
}
