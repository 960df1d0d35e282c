//! Command-line argument definitions for the ACL CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, resolution behavior and logging verbosity.

use clap::Parser;

/// Command-line arguments for the ACL configuration tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input ACL file; standard input when omitted
    #[arg(help = "Path to the input file (reads stdin if omitted)")]
    pub input: Option<String>,

    /// Path to the output file; standard output when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Fail if any reference is left unresolved
    #[arg(long)]
    pub strict: bool,

    /// Print the parsed tree without resolving references
    #[arg(long)]
    pub no_resolve: bool,
}
