//! Error and diagnostic system for the ACL parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans and a line/column position for each problem
//! - Severity levels
//! - A diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning message with optional error code, source
//! locations, and help text. Diagnostics are wrapped in [`ParseError`] for
//! returning from parsing and from strict resolution.
//!
//! # Example
//!
//! ```
//! # use acl_parser::error::{Diagnostic, ErrorCode};
//! # use acl_parser::Span;
//!
//! let span = Span::new(40..41);
//!
//! let diag = Diagnostic::error("expected `;`, found `}`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(span, "unexpected token")
//!     .with_help("every field ends with `;`");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use parse_error::Result;

pub use collector::DiagnosticCollector;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
