//! Dialog components for TUI

mod base;
mod captcha_dialog;
mod error_dialog;

pub use captcha_dialog::{render_captcha_dialog, CaptchaDialog};
pub use error_dialog::render_error_dialog;
