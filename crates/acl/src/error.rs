//! Error types for ACL operations.
//!
//! This module provides the main error type [`AclError`] which wraps the
//! error conditions that can occur while loading, parsing and resolving
//! documents.

use std::io;

use thiserror::Error;

use acl_parser::error::ParseError;

/// The main error type for ACL operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries structured diagnostics together with the
/// source text they point into, so they can be rendered with source
/// context. Strict-mode resolution failures are reported the same way.
#[derive(Debug, Error)]
pub enum AclError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AclError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
