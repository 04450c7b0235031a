//! Token dump rendering.

use crate::error::Result;
use cscan_options::OutputFormat;
use cscan_scanner::{describe, Token};
use serde::Serialize;
use std::io::Write;

/// How a token sequence is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub skip_comments: bool,
    pub show_spans: bool,
}

/// One token in the JSON dump.
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    kind: &'static str,
    lexeme: &'a str,
    start: u32,
    end: u32,
}

impl<'a> From<&'a Token> for TokenRecord<'a> {
    fn from(token: &'a Token) -> Self {
        Self {
            kind: describe(token.kind),
            lexeme: &token.lexeme,
            start: token.span.start,
            end: token.span.end(),
        }
    }
}

fn visible<'a>(
    tokens: &'a [Token],
    options: &RenderOptions,
) -> impl Iterator<Item = &'a Token> + 'a {
    let skip_comments = options.skip_comments;
    tokens
        .iter()
        .filter(move |token| !(skip_comments && token.is_comment()))
}

/// Write `tokens` to `out` in the configured format.
pub fn render(tokens: &[Token], options: &RenderOptions, out: &mut dyn Write) -> Result<()> {
    match options.format {
        OutputFormat::Plain => {
            for token in visible(tokens, options) {
                if options.show_spans {
                    writeln!(out, "{} {} @{}", describe(token.kind), token.lexeme, token.span)?;
                } else {
                    writeln!(out, "{} {}", describe(token.kind), token.lexeme)?;
                }
            }
        }
        OutputFormat::Json => {
            let records: Vec<TokenRecord<'_>> =
                visible(tokens, options).map(TokenRecord::from).collect();
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
