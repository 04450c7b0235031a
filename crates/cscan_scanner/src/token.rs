//! Tokens produced by the scanner.

use crate::keyword::Keyword;
use crate::text::TextSpan;

/// The category of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A preprocessor line such as `#include <vector>`.
    Directive,
    /// `// ...` up to the end of the line.
    LineComment,
    /// `/* ... */`, or everything from `/*` to end of input if unclosed.
    BlockComment,
    Keyword(Keyword),
    Identifier,
    /// Digits and dots, e.g. `3.14` (or the extended form, see
    /// [`ScanOptions::extended_numbers`](crate::ScanOptions::extended_numbers)).
    Number,
    Operator,
    Punctuation,
    StringLiteral,
    CharLiteral,
    /// `::`
    ScopeResolution,
    /// `->`, only with
    /// [`ScanOptions::member_access_kinds`](crate::ScanOptions::member_access_kinds).
    ArrowAccess,
    /// `.`, only with
    /// [`ScanOptions::member_access_kinds`](crate::ScanOptions::member_access_kinds).
    DotAccess,
    /// A single character no other rule accepts.
    Unknown,
}

impl TokenKind {
    /// The keyword sub-tag, if this is a keyword.
    #[inline]
    pub fn keyword(self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }
}

/// Stable human-readable name of a token kind, e.g. `TOK_IDENTIFIER`.
///
/// Keywords are named after their reserved word (`TOK_INT`, `TOK_RETURN`).
pub fn describe(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Directive => "TOK_HEADER",
        TokenKind::LineComment => "TOK_LINE_COMMENT",
        TokenKind::BlockComment => "TOK_BLOCK_COMMENT",
        TokenKind::Keyword(keyword) => keyword.token_name(),
        TokenKind::Identifier => "TOK_IDENTIFIER",
        TokenKind::Number => "TOK_NUMBER",
        TokenKind::Operator => "TOK_OPERATOR",
        TokenKind::Punctuation => "TOK_PUNCTUATION",
        TokenKind::StringLiteral => "TOK_STRING",
        TokenKind::CharLiteral => "TOK_CHAR_LITERAL",
        TokenKind::ScopeResolution => "TOK_SCOPE",
        TokenKind::ArrowAccess => "TOK_ARROW",
        TokenKind::DotAccess => "TOK_DOT",
        TokenKind::Unknown => "TOK_UNKNOWN",
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(describe(*self))
    }
}

/// A scanned token: its kind, the verbatim source text, and where it was
/// found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The exact source text of the token, delimiters included.
    pub lexeme: String,
    /// Byte span of the lexeme in the scanned buffer.
    pub span: TextSpan,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: TextSpan) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Whether this token is a line or block comment.
    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Whether this token carries no code: comments and directives.
    pub fn is_trivia_like(&self) -> bool {
        self.kind.is_comment() || self.kind == TokenKind::Directive
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", describe(self.kind), self.lexeme)
    }
}
