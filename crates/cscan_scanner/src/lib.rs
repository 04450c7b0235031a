//! cscan_scanner: Lexical scanner for a simplified C/C++ dialect.
//!
//! Converts source text into a flat, ordered sequence of classified tokens:
//! - Keywords (each with its own [`Keyword`] sub-tag) and identifiers
//! - Numeric, string and character literals
//! - One- and two-character operators, punctuation, `::`, `->`
//! - Line comments, block comments and preprocessor directives
//!
//! Scanning never fails. Unterminated comments and literals run to the end
//! of input, and characters no rule accepts become `Unknown` tokens.
//!
//! ```
//! use cscan_scanner::{scan, TokenKind};
//!
//! let tokens = scan("x->y;");
//! let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
//! assert_eq!(lexemes, ["x", "->", "y", ";"]);
//! assert_eq!(tokens[1].kind, TokenKind::Punctuation);
//! ```

mod char_codes;
mod keyword;
mod scanner;
mod text;
mod token;

pub use keyword::{classify, Keyword, KEYWORDS};
pub use scanner::{scan, ScanOptions, Scanner};
pub use text::{TextPos, TextSpan};
pub use token::{describe, Token, TokenKind};
