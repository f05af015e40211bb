//! CAPTCHA challenge widgets

mod terminal;
mod traits;

pub use terminal::TerminalCaptcha;
pub use traits::{CaptchaEvent, CaptchaWidget};

#[cfg(test)]
pub use traits::MockCaptchaWidget;
