//! Configuration handling for the forms client

use anyhow::{bail, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default site address
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

const DEFAULT_CONTACT_PATH: &str = "/api/contact";
const DEFAULT_APPLICATION_PATH: &str = "/api/apply";

/// Hosted challenge page the terminal widget points users at
const DEFAULT_CAPTCHA_URL: &str = "https://challenges.example.com/solve";

/// Site key baked in at build time, if any
const BUILD_SITE_KEY: Option<&str> = option_env!("SITE_FORMS_CAPTCHA_SITE_KEY");

pub const ENV_BASE_URL: &str = "SITE_FORMS_BASE_URL";
pub const ENV_SITE_KEY: &str = "SITE_FORMS_CAPTCHA_SITE_KEY";
pub const ENV_CONTENT: &str = "SITE_FORMS_CONTENT";

/// User configuration for the forms client
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteConfig {
    /// Site origin, e.g. `https://www.example.com`
    pub base_url: Option<String>,
    /// Contact endpoint path
    pub contact_path: Option<String>,
    /// Application endpoint path
    pub application_path: Option<String>,
    /// CAPTCHA site key
    pub captcha_site_key: Option<String>,
    /// Challenge page URL
    pub captcha_url: Option<String>,
    /// Page content JSON export
    pub content_path: Option<PathBuf>,
}

/// Configuration with every default applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub contact_url: String,
    pub application_url: String,
    pub captcha_site_key: String,
    pub captcha_url: String,
    pub content_path: Option<PathBuf>,
}

impl SiteConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "site-forms", "site-forms")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: SiteConfig = serde_json::from_str(&content)?;
                tracing::debug!(path = %path.display(), "loaded config");
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Environment values replace file values
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = Some(base_url);
        }
        if let Some(site_key) = lookup(ENV_SITE_KEY) {
            self.captcha_site_key = Some(site_key);
        }
        if let Some(content) = lookup(ENV_CONTENT) {
            self.content_path = Some(PathBuf::from(content));
        }
    }

    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/');

        let captcha_site_key = match self.captcha_site_key.as_deref().or(BUILD_SITE_KEY) {
            Some(key) if !key.trim().is_empty() => key.trim().to_string(),
            _ => bail!("No CAPTCHA site key configured (set {ENV_SITE_KEY})"),
        };

        Ok(ResolvedConfig {
            contact_url: join(
                base_url,
                self.contact_path.as_deref().unwrap_or(DEFAULT_CONTACT_PATH),
            ),
            application_url: join(
                base_url,
                self.application_path
                    .as_deref()
                    .unwrap_or(DEFAULT_APPLICATION_PATH),
            ),
            captcha_site_key,
            captcha_url: self
                .captcha_url
                .clone()
                .unwrap_or_else(|| DEFAULT_CAPTCHA_URL.to_string()),
            content_path: self.content_path.clone(),
        })
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base, path.trim_start_matches('/'))
}
