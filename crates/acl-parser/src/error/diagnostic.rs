//! The core diagnostic type for the ACL error system.
//!
//! A [`Diagnostic`] represents a single error or warning with optional
//! error code, labeled source spans, a line/column position and help text.

use std::fmt;

use acl_core::Span;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    tokens::Position,
};

/// A rich diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E100]: expected `;`, found `}`
///   --> network.acl:3:12
///    |
///  3 |   mtu = 1500 }
///    |              ^ unexpected token
///    |
///    = help: every field ends with `;`
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    position: Option<Position>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use acl_parser::error::{Diagnostic, ErrorCode};
    /// # use acl_parser::Span;
    ///
    /// let span = Span::new(0..10);
    /// let diag = Diagnostic::error("unresolved reference `$Net.mtu`")
    ///     .with_code(ErrorCode::E200)
    ///     .with_label(span, "no field at this path");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the line/column position, if any.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the line/column position.
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            position: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E100]: message at line 3, column 12"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(position) = self.position {
            write!(f, " at {}", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::new(Severity::Error, "test error");

        assert!(diag.severity().is_error());
        assert!(!diag.severity().is_warning());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.position().is_none());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_with_label() {
        let diag = Diagnostic::error("test error").with_label(Span::new(10..20), "error here");

        assert_eq!(diag.labels().len(), 1);
        assert!(diag.labels()[0].is_primary());
        assert_eq!(diag.labels()[0].message(), "error here");
    }

    #[test]
    fn test_diagnostic_with_secondary_label() {
        let diag = Diagnostic::error("unresolved reference")
            .with_label(Span::new(10..20), "reference here")
            .with_secondary_label(Span::new(5..15), "target defined here");

        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
    }

    #[test]
    fn test_diagnostic_display_with_code_and_position() {
        let diag = Diagnostic::error("expected `;`, found `}`")
            .with_code(ErrorCode::E100)
            .with_position(Position {
                offset: 30,
                line: 3,
                column: 12,
            });

        assert_eq!(
            diag.to_string(),
            "error[E100]: expected `;`, found `}` at line 3, column 12"
        );
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::warning("unresolved reference `$.x`");

        assert_eq!(diag.to_string(), "warning: unresolved reference `$.x`");
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("invalid reference index")
            .with_code(ErrorCode::E103)
            .with_label(Span::new(20..24), "expected a string literal")
            .with_help("write the label in quotes, e.g. `[\"eth0\"]`");

        assert_eq!(diag.code(), Some(ErrorCode::E103));
        assert_eq!(diag.labels()[0].span(), Span::new(20..24));
        assert_eq!(
            diag.help(),
            Some("write the label in quotes, e.g. `[\"eth0\"]`")
        );
    }
}
