//! Diagnostics collected while compiling a module.
//!
//! Source diagnostics (errors, warnings, hints) point at a line and can be
//! filtered by a minimum severity. Fatal diagnostics stop the compilation unit:
//! [`Diagnostics::fatal`] records one and returns a [`Fatal`] token that the
//! caller propagates as [`Error::Fatal`](crate::Error::Fatal).

mod message;


use std::fmt;

pub use message::{DiagnosticMessage, Position, Severity};

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Proof that a fatal diagnostic was recorded.
#[must_use = "a fatal diagnostic must stop the compilation unit"]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fatal {
    message: String,
}

impl Fatal {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Record a fatal diagnostic.
    pub fn fatal(&mut self, position: Position, message: impl Into<String>) -> Fatal {
        let message = message.into();
        tracing::debug!(%position, %message, "fatal diagnostic");
        self.messages.push(DiagnosticMessage::new(
            Severity::Fatal,
            position,
            message.clone(),
        ));
        Fatal { message }
    }

    pub fn error(&mut self, line: u32, message: impl Into<String>) {
        self.push(Severity::Error, line, message);
    }

    pub fn warning(&mut self, line: u32, message: impl Into<String>) {
        self.push(Severity::Warning, line, message);
    }

    pub fn hint(&mut self, line: u32, message: impl Into<String>) {
        self.push(Severity::Hint, line, message);
    }

    fn push(&mut self, severity: Severity, line: u32, message: impl Into<String>) {
        self.messages.push(DiagnosticMessage::new(
            severity,
            Position::Line(line),
            message,
        ));
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_fatal(&self) -> bool {
        self.messages.iter().any(|d| d.is_fatal())
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn fatal_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_fatal()).count()
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    /// Diagnostics at or above `min`. Fatal diagnostics always pass.
    pub fn filter_by_severity(&self, min: Severity) -> Vec<&DiagnosticMessage> {
        self.messages
            .iter()
            .filter(|d| d.is_fatal() || d.severity >= min)
            .collect()
    }

    /// One line per diagnostic at or above `min`.
    pub fn render(&self, min: Severity) -> String {
        let mut out = String::new();
        for d in self.filter_by_severity(min) {
            out.push_str(&d.to_string());
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticMessage;
    type IntoIter = std::slice::Iter<'a, DiagnosticMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
