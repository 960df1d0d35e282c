//! ACL - A hierarchical configuration language with cross-block references.
//!
//! Parsing, reference resolution and printing for ACL documents. Documents
//! are named, nested blocks of typed or inferred fields whose values may
//! point at other fields through `$Block.path`, `$.path` and `^path`
//! references.

pub mod config;
pub mod print;
pub mod resolve;

mod error;

pub use acl_core::{
    Block, BlockId, Document, Field, Id, Reference, Scope, Segment, Span, TypeTag, Value,
};
pub use acl_parser::error::{Diagnostic, ErrorCode, ParseError};

pub use error::AclError;

use std::{fs, path::Path};

use log::{debug, info, trace, warn};

use acl_parser::error::DiagnosticCollector;

use config::AppConfig;
use resolve::{Failure, Resolution, UnresolvedReference};

/// Front end for parsing, resolving and printing ACL documents.
///
/// # Examples
///
/// ```
/// use acl::{Compiler, Value, config::AppConfig};
///
/// let source = r#"
///     Network {
///         interface "eth0" { gateway = "1.1.1.1"; }
///         interface "wlan0" { gateway = "2.2.2.2"; }
///     }
///     Route { via = $Network.interface["wlan0"].gateway; }
/// "#;
///
/// let compiler = Compiler::new(AppConfig::default());
/// let document = compiler.compile(source).expect("Failed to compile");
///
/// let route = document.block(document.roots()[1]);
/// assert_eq!(route.fields()[0].value(), &Value::from("2.2.2.2"));
/// ```
#[derive(Debug, Default)]
pub struct Compiler {
    config: AppConfig,
}

impl Compiler {
    /// Create a new compiler with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into an unresolved document.
    ///
    /// # Errors
    ///
    /// Returns `AclError::Parse` for the first syntax error.
    pub fn parse(&self, source: &str) -> Result<Document, AclError> {
        info!("Parsing document");

        let document =
            acl_parser::parse(source).map_err(|err| AclError::new_parse_error(err, source))?;

        debug!(blocks = document.len(); "Document parsed successfully");
        trace!(document:?; "Parsed document");
        Ok(document)
    }

    /// Read and parse a file, returning its text alongside the document.
    ///
    /// The text is kept so later diagnostics can point into it.
    ///
    /// # Errors
    ///
    /// Returns `AclError::Io` if the file cannot be read, or `AclError::Parse`
    /// for the first syntax error.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(String, Document), AclError> {
        let path = path.as_ref();
        debug!(path:? = path; "Reading source file");
        let source = fs::read_to_string(path)?;
        let document = self.parse(&source)?;
        Ok((source, document))
    }

    /// Resolve the references of a document parsed from `source`.
    ///
    /// Each unresolved reference becomes a diagnostic: E201 when its target
    /// never resolved, E200 otherwise. Outside strict mode the diagnostics are
    /// warnings and only logged; in strict mode they are errors.
    ///
    /// # Errors
    ///
    /// Returns `AclError::Parse` in strict mode if any reference is left.
    pub fn resolve(&self, document: &mut Document, source: &str) -> Result<Resolution, AclError> {
        info!("Resolving references");
        let settings = self.config.resolve();
        let resolution = resolve::resolve(document, settings);

        if resolution.is_complete() {
            debug!(
                passes = resolution.passes(),
                resolved = resolution.resolved();
                "All references resolved"
            );
            return Ok(resolution);
        }

        let strict = settings.strict();
        let mut collector = DiagnosticCollector::new();
        for unresolved in resolution.unresolved() {
            let diag = unresolved_diagnostic(document, unresolved, strict);
            if !strict {
                warn!(field:% = unresolved.field; "{diag}");
            }
            collector.emit(diag);
        }
        collector
            .finish()
            .map_err(|err| AclError::new_parse_error(err, source))?;
        Ok(resolution)
    }

    /// Parse and resolve in one step.
    ///
    /// # Errors
    ///
    /// Returns `AclError::Parse` for syntax errors, and in strict mode for
    /// unresolved references.
    pub fn compile(&self, source: &str) -> Result<Document, AclError> {
        let mut document = self.parse(source)?;
        self.resolve(&mut document, source)?;
        Ok(document)
    }

    /// Render a document in the printed block/field format.
    pub fn render(&self, document: &Document) -> String {
        print::render(document)
    }
}

fn unresolved_diagnostic(
    document: &Document,
    unresolved: &UnresolvedReference,
    strict: bool,
) -> Diagnostic {
    let code = match unresolved.reason {
        Failure::PendingTarget => ErrorCode::E201,
        _ => ErrorCode::E200,
    };

    let message = format!(
        "unresolved reference `{}` in field `{}`",
        unresolved.reference, unresolved.field
    );
    let diag = if strict {
        Diagnostic::error(message)
    } else {
        Diagnostic::warning(message)
    };
    let mut diag = diag
        .with_code(code)
        .with_label(unresolved.reference.span(), unresolved.reason.to_string());

    if let Some(field) = document.block(unresolved.block).field(unresolved.field) {
        diag = diag.with_secondary_label(field.span(), "in this field");
    }

    match unresolved.reason {
        Failure::PendingTarget => {
            diag.with_help("the target refers back to this value or to another unresolved reference")
        }
        Failure::MissingRoot => diag.with_help("global references start at a top-level block"),
        Failure::TooFewAncestors => diag.with_help("each `^` moves up one enclosing block"),
        Failure::EndsAtBlock => diag.with_help("add the name of a field to the end of the path"),
        Failure::NotAttempted => diag.with_help("raise `resolve.max_passes` above 0"),
        Failure::MissingPath => diag,
    }
}
