//! cscan: dump the token stream of C-like source files.
//!
//! Usage:
//!   cscan [options] [file...]
//!
//! With no files, scans standard input when it is piped and the built-in
//! demo program otherwise.

mod error;
mod render;

use clap::{Parser as ClapParser, ValueEnum};
use cscan_options::{
    parse_config_file, to_config_string, CscanConfig, OutputFormat, CONFIG_FILE_NAME,
};
use cscan_scanner::{ScanOptions, Scanner};
use error::{CliError, Result};
use render::{render, RenderOptions};
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEMO_SOURCE: &str = "int x = 5;\nx++;\n--x;\nint y = x ** 2;\n";

#[derive(ClapParser, Debug)]
#[command(name = "cscan", version, about = "cscan - A lexical scanner for C-like source")]
struct Cli {
    /// Source files to scan; `-` reads standard input.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Path to cscan.json.
    #[arg(short = 'p', long = "project")]
    project: Option<PathBuf>,

    /// Scan the built-in demo program.
    #[arg(long)]
    demo: bool,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Leave comments out of the dump.
    #[arg(long)]
    skip_comments: bool,

    /// Append the byte span of each token.
    #[arg(long)]
    show_spans: bool,

    /// Accept hex prefixes and signed exponents in numbers.
    #[arg(long)]
    extended_numbers: bool,

    /// Report `->` and `.` as member access tokens.
    #[arg(long)]
    member_access_kinds: bool,

    /// Enable debug logging.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored log output.
    #[arg(long)]
    no_color: bool,

    /// Initialize a cscan.json file.
    #[arg(long)]
    init: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Plain,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Plain => OutputFormat::Plain,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Where a source text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Demo,
    Stdin,
    File(PathBuf),
}

impl Input {
    fn name(&self) -> String {
        match self {
            Input::Demo => "<demo>".to_string(),
            Input::Stdin => "<stdin>".to_string(),
            Input::File(path) => path.display().to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Input::Demo => Ok(DEMO_SOURCE.to_string()),
            Input::Stdin => {
                let mut bytes = Vec::new();
                io::stdin()
                    .read_to_end(&mut bytes)
                    .map_err(CliError::ReadStdin)?;
                Ok(decode_source(bytes, &self.name()))
            }
            Input::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| CliError::ReadInput {
                    path: path.clone(),
                    source,
                })?;
                Ok(decode_source(bytes, &self.name()))
            }
        }
    }
}

/// Decode source bytes as UTF-8, replacing invalid sequences with U+FFFD.
fn decode_source(bytes: Vec<u8>, name: &str) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            warn!(
                input = name,
                offset = err.utf8_error().valid_up_to(),
                "input is not valid UTF-8, invalid bytes replaced with U+FFFD"
            );
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color)?;

    if cli.init {
        run_init(Path::new(CONFIG_FILE_NAME))?;
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_scan(&cli, io::stdin().is_terminal(), Path::new("."), &mut out)?;
    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color && io::stderr().is_terminal())
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    Ok(())
}

fn run_init(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(CliError::ConfigExists {
            path: path.to_path_buf(),
        });
    }

    let text = to_config_string(&CscanConfig::init_template())?;
    std::fs::write(path, text).map_err(|source| CliError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "created configuration file");
    Ok(())
}

/// Scan every input and write the dump to `out`. `config_dir` is where
/// `cscan.json` is looked up when `-p` is absent.
fn run_scan(
    cli: &Cli,
    stdin_is_terminal: bool,
    config_dir: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let config = load_config(cli.project.as_deref(), config_dir)?;
    let scan_options = resolve_scan_options(cli, &config);
    let render_options = resolve_render_options(cli, &config);
    let inputs = resolve_inputs(cli, stdin_is_terminal);
    debug!(?scan_options, ?render_options, inputs = inputs.len(), "starting scan");

    let show_headers = inputs.len() > 1 && render_options.format == OutputFormat::Plain;

    for input in &inputs {
        let text = input.read()?;
        let tokens = Scanner::with_options(&text, scan_options).scan();
        debug!(input = %input.name(), tokens = tokens.len(), "scanned input");

        if show_headers {
            writeln!(out, "==> {} <==", input.name())?;
        }
        render(&tokens, &render_options, out)?;
    }

    out.flush()?;
    Ok(())
}

/// Load the configuration named by `-p`, or `cscan.json` in `config_dir`
/// when it exists.
fn load_config(project: Option<&Path>, config_dir: &Path) -> Result<CscanConfig> {
    match project {
        Some(path) => Ok(parse_config_file(path)?),
        None => {
            let default_path = config_dir.join(CONFIG_FILE_NAME);
            if default_path.is_file() {
                Ok(parse_config_file(&default_path)?)
            } else {
                Ok(CscanConfig::default())
            }
        }
    }
}

fn resolve_scan_options(cli: &Cli, config: &CscanConfig) -> ScanOptions {
    let mut options = config.scan_options();

    // CLI options override cscan.json
    if cli.extended_numbers { options.extended_numbers = true; }
    if cli.member_access_kinds { options.member_access_kinds = true; }

    options
}

fn resolve_render_options(cli: &Cli, config: &CscanConfig) -> RenderOptions {
    RenderOptions {
        format: cli.format.map(OutputFormat::from).unwrap_or_else(|| config.output_format()),
        skip_comments: cli.skip_comments || config.skip_comments(),
        show_spans: cli.show_spans || config.show_spans(),
    }
}

fn resolve_inputs(cli: &Cli, stdin_is_terminal: bool) -> Vec<Input> {
    let mut inputs: Vec<Input> = cli
        .files
        .iter()
        .map(|file| {
            if file == "-" {
                Input::Stdin
            } else {
                Input::File(PathBuf::from(file))
            }
        })
        .collect();

    if cli.demo {
        inputs.insert(0, Input::Demo);
    } else if inputs.is_empty() {
        inputs.push(if stdin_is_terminal { Input::Demo } else { Input::Stdin });
    }

    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use cscan_options::parse_config;

    fn parse_args(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cscan").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_flags() {
        let cli = parse_args(&["--format", "json", "--show-spans", "-v", "a.cpp", "-"]);
        assert_eq!(cli.format, Some(FormatArg::Json));
        assert!(cli.show_spans);
        assert!(cli.verbose);
        assert_eq!(cli.files, vec!["a.cpp", "-"]);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let args = ["cscan", "--format", "xml"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_inputs_default_to_demo_on_terminal() {
        let cli = parse_args(&[]);
        assert_eq!(resolve_inputs(&cli, true), vec![Input::Demo]);
        assert_eq!(resolve_inputs(&cli, false), vec![Input::Stdin]);
    }

    #[test]
    fn test_inputs_from_files() {
        let cli = parse_args(&["--demo", "a.c", "-"]);
        assert_eq!(
            resolve_inputs(&cli, false),
            vec![
                Input::Demo,
                Input::File(PathBuf::from("a.c")),
                Input::Stdin,
            ]
        );
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = parse_config(
            r#"{
                "scannerOptions": { "memberAccessKinds": true },
                "output": { "format": "json", "skipComments": true }
            }"#,
        )
        .unwrap();

        let cli = parse_args(&["--extended-numbers", "--format", "plain"]);
        let scan_options = resolve_scan_options(&cli, &config);
        assert!(scan_options.extended_numbers);
        assert!(scan_options.member_access_kinds);

        let render_options = resolve_render_options(&cli, &config);
        assert_eq!(render_options.format, OutputFormat::Plain);
        assert!(render_options.skip_comments);
        assert!(!render_options.show_spans);
    }

    #[test]
    fn test_demo_input() {
        assert_eq!(Input::Demo.read().unwrap(), DEMO_SOURCE);
        assert_eq!(Input::Demo.name(), "<demo>");
    }

    #[test]
    fn test_missing_file_input() {
        let input = Input::File(PathBuf::from("/definitely/not/here.c"));
        assert!(matches!(input.read(), Err(CliError::ReadInput { .. })));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r#"{ "output": { "showSpans": true } }"#).unwrap();
        let config = load_config(Some(&path), dir.path()).unwrap();
        assert!(config.show_spans());

        let missing = load_config(Some(&dir.path().join("absent.json")), dir.path());
        assert!(matches!(missing, Err(CliError::Config(_))));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        run_init(&path).unwrap();
        let written = parse_config_file(&path).unwrap();
        assert_eq!(written, CscanConfig::init_template());

        let err = run_init(&path).unwrap_err();
        assert!(matches!(err, CliError::ConfigExists { .. }));
    }

    fn write_source(dir: &Path, name: &str, contents: &[u8]) -> String {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_str().unwrap().to_string()
    }

    fn scan_to_string(args: &[&str], config_dir: &Path) -> String {
        let cli = parse_args(args);
        let mut out = Vec::new();
        run_scan(&cli, true, config_dir, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_headers_for_several_plain_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_source(dir.path(), "a.c", b"int x;");
        let b = write_source(dir.path(), "b.c", b"y");

        let text = scan_to_string(&[a.as_str(), b.as_str()], dir.path());
        assert_eq!(
            text,
            format!(
                "==> {a} <==\nTOK_INT int\nTOK_IDENTIFIER x\nTOK_PUNCTUATION ;\n\
                 ==> {b} <==\nTOK_IDENTIFIER y\n"
            )
        );
    }

    #[test]
    fn test_no_header_for_single_input() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_source(dir.path(), "a.c", b"x++;");

        let text = scan_to_string(&[a.as_str()], dir.path());
        assert_eq!(text, "TOK_IDENTIFIER x\nTOK_OPERATOR ++\nTOK_PUNCTUATION ;\n");
    }

    #[test]
    fn test_json_array_per_input() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_source(dir.path(), "a.c", b"int x;");
        let b = write_source(dir.path(), "b.c", b"y");

        let text = scan_to_string(&["--format", "json", a.as_str(), b.as_str()], dir.path());
        assert!(!text.contains("==>"));
        let arrays: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&text)
            .into_iter::<serde_json::Value>()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(arrays.len(), 2);
        assert_eq!(arrays[0].as_array().unwrap().len(), 3);
        assert_eq!(arrays[1][0]["lexeme"], "y");
    }

    #[test]
    fn test_config_in_config_dir_is_used() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "output": { "format": "json", "showSpans": true } }"#,
        )
        .unwrap();
        let a = write_source(dir.path(), "a.c", b"p->q");

        let text = scan_to_string(&[a.as_str()], dir.path());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[1]["lexeme"], "->");
        assert_eq!(value[1]["end"], 3);
    }

    #[test]
    fn test_missing_config_dir_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert_eq!(config, CscanConfig::default());
    }

    #[test]
    fn test_invalid_utf8_input_is_scanned_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_source(dir.path(), "latin1.c", b"int x; // caf\xe9\n");

        let text = scan_to_string(&[a.as_str()], dir.path());
        assert_eq!(
            text,
            "TOK_INT int\nTOK_IDENTIFIER x\nTOK_PUNCTUATION ;\nTOK_LINE_COMMENT // caf\u{FFFD}\n"
        );
    }

    #[test]
    fn test_decode_source_keeps_valid_utf8() {
        assert_eq!(decode_source("caf\u{e9}".as_bytes().to_vec(), "a.c"), "caf\u{e9}");
        assert_eq!(decode_source(vec![b'a', 0xff, b'b'], "a.c"), "a\u{FFFD}b");
    }
}
