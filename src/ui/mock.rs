//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use apiconf::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("{\"apiBaseUrl\": \"http://localhost:5000\"}");
//! ui.success("Resolved development");
//!
//! assert!(ui.messages()[0].contains("localhost:5000"));
//! assert_eq!(ui.successes(), &["Resolved development".to_string()]);
//! ```

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    fields: Vec<(String, String)>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Messages written to stdout.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Key-value fields written to stdout.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Look up a field by key.
    pub fn field_value(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Headers shown.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All stdout output joined with newlines, as a terminal would show it.
    pub fn stdout(&self) -> String {
        self.messages.join("\n")
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn field(&mut self, key: &str, value: &str) {
        self.fields.push((key.to_string(), value.to_string()));
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.successes.push(msg.to_string());
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.warnings.push(msg.to_string());
        }
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            self.headers.push(title.to_string());
        }
    }
}
