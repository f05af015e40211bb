//! Page copy delivered by the content layer
//!
//! Headings, placeholders and the list of open vacancies are read once from
//! a JSON export and handed to the forms read-only. Anything missing falls
//! back to built-in defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const DEFAULT_PLACEHOLDERS: &[(&str, &str)] = &[
    ("name", "Your full name"),
    ("email", "you@example.com"),
    ("confirmEmail", "Repeat your email"),
    ("phone", "+1 555 010 0000"),
    ("company", "Company (optional)"),
    ("position", "Your role (optional)"),
    ("location", "City, Country"),
    ("linkedIn", "https://www.linkedin.com/in/..."),
    ("message", "Tell us a little about your project"),
    ("jobTitle", "Choose with ←/→"),
    ("resume", "Path to your CV, then press Enter"),
];

fn default_placeholder(name: &str) -> String {
    DEFAULT_PLACEHOLDERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, p)| p.to_string())
        .unwrap_or_default()
}

/// Copy for the contact page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactContent {
    pub heading: String,
    pub intro: String,
    pub placeholders: HashMap<String, String>,
}

impl Default for ContactContent {
    fn default() -> Self {
        Self {
            heading: "Get in touch".to_string(),
            intro: "Tell us about your project and we'll get back to you.".to_string(),
            placeholders: HashMap::new(),
        }
    }
}

impl ContactContent {
    pub fn placeholder(&self, field: &str) -> String {
        self.placeholders
            .get(field)
            .cloned()
            .unwrap_or_else(|| default_placeholder(field))
    }
}

/// Copy for the careers page, including the open vacancies
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CareersContent {
    pub heading: String,
    pub intro: String,
    pub placeholders: HashMap<String, String>,
    pub vacancies: Vec<String>,
}

impl Default for CareersContent {
    fn default() -> Self {
        Self {
            heading: "Join us".to_string(),
            intro: "Apply for one of our open positions.".to_string(),
            placeholders: HashMap::new(),
            vacancies: Vec::new(),
        }
    }
}

impl CareersContent {
    pub fn placeholder(&self, field: &str) -> String {
        self.placeholders
            .get(field)
            .cloned()
            .unwrap_or_else(|| default_placeholder(field))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContent {
    pub contact: ContactContent,
    pub careers: CareersContent,
}

impl PageContent {
    /// Load a content export, using defaults when the file does not exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::warn!(path = %path.display(), "page content not found, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page content {}", path.display()))?;
        let content: PageContent = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid page content in {}", path.display()))?;
        tracing::debug!(
            vacancies = content.careers.vacancies.len(),
            "loaded page content"
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_placeholders() {
        let content = ContactContent::default();
        assert_eq!(content.placeholder("email"), "you@example.com");
        assert_eq!(content.placeholder("unknown"), "");
    }

    #[test]
    fn test_configured_placeholder_wins() {
        let mut content = CareersContent::default();
        content
            .placeholders
            .insert("email".to_string(), "name@company.com".to_string());
        assert_eq!(content.placeholder("email"), "name@company.com");
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{"careers": {"vacancies": ["Rust Engineer"]}}"#;
        let content: PageContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.careers.vacancies, vec!["Rust Engineer".to_string()]);
        assert_eq!(content.careers.heading, "Join us");
        assert_eq!(content.contact.heading, "Get in touch");
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{"seo": {"title": "x"}, "contact": {"heading": "Say hi"}}"#;
        let content: PageContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.contact.heading, "Say hi");
    }

    #[test]
    fn test_load_none_is_default() {
        let content = PageContent::load(None).unwrap();
        assert!(content.careers.vacancies.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let content = PageContent::load(Some(Path::new("/no/such/content.json"))).unwrap();
        assert_eq!(content.contact.heading, "Get in touch");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"careers": {{"vacancies": ["Designer", "Producer"]}}}}"#
        )
        .unwrap();
        let content = PageContent::load(Some(file.path())).unwrap();
        assert_eq!(content.careers.vacancies.len(), 2);
    }

    #[test]
    fn test_load_invalid_json_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(PageContent::load(Some(file.path())).is_err());
    }
}
