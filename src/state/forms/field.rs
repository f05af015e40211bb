//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// A selection from a list of options; `None` until the user picks one
    Choice(Option<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub placeholder: String,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &'static str, label: &str, is_multiline: bool) -> Self {
        Self {
            name,
            label: label.to_string(),
            placeholder: String::new(),
            value: FieldValue::Text(String::new()),
            is_multiline,
        }
    }

    /// Create a new choice field with nothing selected
    pub fn choice(name: &'static str, label: &str) -> Self {
        Self {
            name,
            label: label.to_string(),
            placeholder: String::new(),
            value: FieldValue::Choice(None),
            is_multiline: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Get the text value (the selected option for choice fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Choice(selected) => selected.as_deref().unwrap_or(""),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice(_))
    }

    /// Set the text value
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.value = FieldValue::Text(value.into());
    }

    /// Select an option, or clear the selection with `None`
    pub fn select(&mut self, option: Option<String>) {
        self.value = FieldValue::Choice(option);
    }

    /// Move the selection through `options`, wrapping at both ends
    pub fn cycle_choice(&mut self, options: &[String], forward: bool) {
        if options.is_empty() {
            return;
        }
        let FieldValue::Choice(selected) = &self.value else {
            return;
        };
        let current = selected
            .as_ref()
            .and_then(|s| options.iter().position(|o| o == s));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(0), false) => options.len() - 1,
            (Some(i), false) => i - 1,
        };
        self.value = FieldValue::Choice(Some(options[next].clone()));
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => {
                s.pop();
            }
            FieldValue::Choice(selected) => *selected = None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice(Some(s)) => format!("◂ {s} ▸"),
            FieldValue::Choice(None) => String::new(),
        }
    }
}
