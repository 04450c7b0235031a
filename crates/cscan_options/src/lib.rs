//! cscan_options: cscan.json parsing and scanner/output options.
//!
//! Every field is optional; an empty object is a valid configuration that
//! selects the canonical scanner behavior and plain output.

use cscan_scanner::ScanOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "cscan.json";

/// Scanner behavior switches, as written in cscan.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerOptions {
    /// Accept hex prefixes and signed exponents in numbers.
    pub extended_numbers: Option<bool>,
    /// Emit dedicated kinds for `->` and `.`.
    pub member_access_kinds: Option<bool>,
}

impl ScannerOptions {
    pub fn to_scan_options(&self) -> ScanOptions {
        ScanOptions {
            extended_numbers: self.extended_numbers.unwrap_or(false),
            member_access_kinds: self.member_access_kinds.unwrap_or(false),
        }
    }
}

/// Token dump format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `TOK_KIND lexeme`, one token per line.
    #[default]
    Plain,
    /// A JSON array of token objects.
    Json,
}

/// How the token dump is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub format: Option<OutputFormat>,
    /// Drop line and block comments from the dump.
    pub skip_comments: Option<bool>,
    /// Append the byte span of each token.
    pub show_spans: Option<bool>,
}

/// The cscan.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CscanConfig {
    pub scanner_options: Option<ScannerOptions>,
    pub output: Option<OutputOptions>,
}

impl CscanConfig {
    /// The configuration written by `cscan --init`.
    pub fn init_template() -> Self {
        Self {
            scanner_options: Some(ScannerOptions {
                extended_numbers: Some(false),
                member_access_kinds: Some(false),
            }),
            output: Some(OutputOptions {
                format: Some(OutputFormat::Plain),
                skip_comments: Some(false),
                show_spans: Some(false),
            }),
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        self.scanner_options
            .as_ref()
            .map(ScannerOptions::to_scan_options)
            .unwrap_or_default()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    pub fn skip_comments(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.skip_comments)
            .unwrap_or(false)
    }

    pub fn show_spans(&self) -> bool {
        self.output
            .as_ref()
            .and_then(|o| o.show_spans)
            .unwrap_or(false)
    }
}

/// Errors while loading a configuration file.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse a cscan.json file from a string.
pub fn parse_config(content: &str) -> Result<CscanConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a cscan.json file from a path.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<CscanConfig, OptionsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| OptionsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?config, "loaded configuration");
    Ok(config)
}

/// Render a configuration as pretty-printed JSON with a trailing newline.
pub fn to_config_string(config: &CscanConfig) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(config)?;
    text.push('\n');
    Ok(text)
}
