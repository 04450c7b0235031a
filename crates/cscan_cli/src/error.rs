//! Error types for the cscan CLI.
//!
//! Scanning itself never fails; everything here comes from reading input,
//! loading configuration, or writing output.

use cscan_options::OptionsError;
use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the cscan CLI.
#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read input '{}'", path.display())]
    #[diagnostic(
        code(cscan::read_input),
        help("check that the file exists and is readable")
    )]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read standard input")]
    #[diagnostic(code(cscan::read_stdin))]
    ReadStdin(#[source] io::Error),

    #[error("configuration error")]
    #[diagnostic(
        code(cscan::config),
        help("run `cscan --init` to generate a valid cscan.json")
    )]
    Config(#[from] OptionsError),

    #[error("'{}' already exists", path.display())]
    #[diagnostic(code(cscan::init_exists), help("edit the existing file instead"))]
    ConfigExists { path: PathBuf },

    #[error("failed to write '{}'", path.display())]
    #[diagnostic(code(cscan::write_file))]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize JSON")]
    #[diagnostic(code(cscan::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to write output")]
    #[diagnostic(code(cscan::output))]
    Output(#[from] io::Error),

    #[error("failed to initialize logging: {0}")]
    #[diagnostic(code(cscan::logging))]
    Logging(String),
}

/// Result type alias using CliError.
pub type Result<T> = std::result::Result<T, CliError>;
