//! # ACL Parser
//!
//! Lexer and parser for the ACL hierarchical configuration language. This
//! crate turns source text into an [`acl_core::Document`]; references inside
//! the document are left unresolved.
//!
//! ## Usage
//!
//! ```
//! # use acl_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         Network {
//!             interface "eth0" { gateway = "1.1.1.1"; }
//!             primary = $Network.interface["eth0"].gateway;
//!         }
//!     "#;
//!
//!     let document = parse(source)?;
//!     assert_eq!(document.roots().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod cursor;
pub mod error;
pub mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod reference;
pub mod tokens;

pub use acl_core::Span;
pub use error::{Diagnostic, ErrorCode, ParseError};

use log::debug;

use acl_core::Document;

use parser::Parser;

/// Parse source text into a document.
///
/// Parsing is all or nothing: the first syntax error aborts it and is
/// returned as a [`ParseError`] with a single diagnostic.
///
/// # Example
///
/// ```
/// # use acl_parser::parse;
///
/// let err = parse("Server { port = 8080 }").unwrap_err();
/// assert!(err.to_string().starts_with("error[E100]: expected `;`"));
/// ```
pub fn parse(source: &str) -> Result<Document, ParseError> {
    debug!(bytes = source.len(); "Parsing document");

    let document = Parser::new(source).parse_document().map_err(ParseError::from)?;

    debug!(
        roots = document.roots().len(),
        blocks = document.len(),
        references = document.references().len();
        "Parsed document"
    );
    Ok(document)
}
