//! CLI logic for the ACL configuration tool.
//!
//! Reads a document, resolves its references and prints the resulting tree.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use acl::{AclError, Compiler};

/// Run the ACL CLI application
///
/// Reads the input file (or stdin), parses it, resolves references unless
/// `--no-resolve` is given, and writes the printed tree to the output file
/// (or stdout).
///
/// # Errors
///
/// Returns `AclError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Syntax errors
/// - Unresolved references in strict mode
pub fn run(args: &Args) -> Result<(), AclError> {
    info!(
        input_path:? = args.input,
        output_path:? = args.output;
        "Processing document"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.strict {
        app_config = app_config.with_strict(true);
    }

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };

    let compiler = Compiler::new(app_config);
    let mut document = compiler.parse(&source)?;
    if !args.no_resolve {
        let resolution = compiler.resolve(&mut document, &source)?;
        info!(
            passes = resolution.passes(),
            resolved = resolution.resolved(),
            unresolved = resolution.unresolved().len();
            "References resolved"
        );
    }

    let rendered = compiler.render(&document);
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(output_file = path.as_str(); "Document written");
        }
        None => io::stdout().lock().write_all(rendered.as_bytes())?,
    }

    Ok(())
}
