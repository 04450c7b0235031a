//! The scanner.
//!
//! Converts source text into a flat sequence of [`Token`]s. At each cursor
//! position the rules in [`RULES`] are tried in priority order and the first
//! one that matches consumes at least one character. Anything no rule
//! accepts becomes a one-character [`TokenKind::Unknown`], so every
//! non-whitespace character ends up in exactly one token.

use crate::char_codes::*;
use crate::keyword::classify;
use crate::text::TextSpan;
use crate::token::{Token, TokenKind};
use memchr::{memchr, memmem};
use tracing::debug;

/// Behavior switches for [`Scanner`]. The default is the canonical dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Accept `0x` prefixes, letters inside numbers, and signed exponents
    /// (`0xFF`, `1.5e-3`). Off: numbers are `[0-9][0-9.]*`.
    pub extended_numbers: bool,
    /// Emit [`TokenKind::ArrowAccess`] / [`TokenKind::DotAccess`] for `->`
    /// and `.` instead of [`TokenKind::Punctuation`].
    pub member_access_kinds: bool,
}

/// A scanning rule. See [`RULES`] for the order they are tried in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Whitespace,
    Directive,
    MultiCharOperator,
    LineComment,
    ScopeResolution,
    BlockComment,
    Word,
    Number,
    MemberAccess,
    SingleCharOperator,
    Punctuation,
    StringLiteral,
    CharLiteral,
}

/// Rules in priority order, highest first.
///
/// `MultiCharOperator` precedes `MemberAccess` so `--` wins over `-`, and
/// `MemberAccess` precedes `SingleCharOperator` so `->` wins over `-`.
/// `LineComment` and `BlockComment` precede `SingleCharOperator` for `/`.
const RULES: [Rule; 13] = [
    Rule::Whitespace,
    Rule::Directive,
    Rule::MultiCharOperator,
    Rule::LineComment,
    Rule::ScopeResolution,
    Rule::BlockComment,
    Rule::Word,
    Rule::Number,
    Rule::MemberAccess,
    Rule::SingleCharOperator,
    Rule::Punctuation,
    Rule::StringLiteral,
    Rule::CharLiteral,
];

/// What a matched rule produced.
enum Step {
    /// Input was consumed without producing a token (whitespace).
    Skip,
    /// Input was consumed into a token of this kind.
    Emit(TokenKind),
}

/// The scanner converts source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    /// Current byte position in the text. Always on a char boundary between
    /// tokens.
    pos: usize,
    options: ScanOptions,
}

/// Scan `text` with the default options.
pub fn scan(text: &str) -> Vec<Token> {
    Scanner::new(text).scan()
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        Self::with_options(text, ScanOptions::default())
    }

    pub fn with_options(text: &'a str, options: ScanOptions) -> Self {
        Self {
            text,
            pos: 0,
            options,
        }
    }

    /// Scan the remaining input and return every token in source order.
    pub fn scan(mut self) -> Vec<Token> {
        let tokens: Vec<Token> = self.by_ref().collect();
        debug!(
            tokens = tokens.len(),
            bytes = self.text.len(),
            "scanned buffer"
        );
        tokens
    }

    /// Scan the next token, skipping whitespace. Returns `None` at end of
    /// input.
    pub fn next_token(&mut self) -> Option<Token> {
        while !self.is_eof() {
            let start = self.pos;
            let step = self.apply_rules();
            debug_assert!(self.pos > start, "scanner rule did not advance");
            match step {
                Step::Skip => continue,
                Step::Emit(kind) => return Some(self.make_token(kind, start)),
            }
        }
        None
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    /// The byte at the current position. Callers check `is_eof` first.
    #[inline]
    fn current(&self) -> u8 {
        self.bytes()[self.pos]
    }

    /// The byte at position pos + offset.
    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Byte length of the char starting at the current position.
    #[inline]
    fn current_char_len(&self) -> usize {
        self.text[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8)
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(
            kind,
            &self.text[start..self.pos],
            TextSpan::from_offsets(start, self.pos),
        )
    }

    fn apply_rules(&mut self) -> Step {
        for rule in RULES {
            if let Some(step) = self.try_rule(rule) {
                return step;
            }
        }
        self.scan_unknown()
    }

    fn try_rule(&mut self, rule: Rule) -> Option<Step> {
        let ch = self.current();
        let next = self.byte_at(1);
        match rule {
            Rule::Whitespace => is_white_space(ch).then(|| self.skip_white_space()),
            Rule::Directive => (ch == HASH).then(|| self.scan_to_line_end(TokenKind::Directive)),
            Rule::MultiCharOperator => next
                .filter(|&next| is_multi_char_operator(ch, next))
                .map(|_| self.consume(2, TokenKind::Operator)),
            Rule::LineComment => (ch == SLASH && next == Some(SLASH))
                .then(|| self.scan_to_line_end(TokenKind::LineComment)),
            Rule::ScopeResolution => (ch == COLON && next == Some(COLON))
                .then(|| self.consume(2, TokenKind::ScopeResolution)),
            Rule::BlockComment => {
                (ch == SLASH && next == Some(ASTERISK)).then(|| self.scan_block_comment())
            }
            Rule::Word => is_word_start(ch).then(|| self.scan_word()),
            Rule::Number => is_digit(ch).then(|| self.scan_number()),
            Rule::MemberAccess => self.scan_member_access(ch, next),
            Rule::SingleCharOperator => is_operator(ch).then(|| self.consume(1, TokenKind::Operator)),
            Rule::Punctuation => is_punctuation(ch).then(|| self.consume(1, TokenKind::Punctuation)),
            Rule::StringLiteral => (ch == DOUBLE_QUOTE)
                .then(|| self.scan_quoted(DOUBLE_QUOTE, TokenKind::StringLiteral)),
            Rule::CharLiteral => (ch == SINGLE_QUOTE)
                .then(|| self.scan_quoted(SINGLE_QUOTE, TokenKind::CharLiteral)),
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn consume(&mut self, len: usize, kind: TokenKind) -> Step {
        self.pos += len;
        Step::Emit(kind)
    }

    fn skip_white_space(&mut self) -> Step {
        while !self.is_eof() && is_white_space(self.current()) {
            self.pos += 1;
        }
        Step::Skip
    }

    /// Consume through (not including) the next line feed.
    fn scan_to_line_end(&mut self, kind: TokenKind) -> Step {
        let rest = &self.bytes()[self.pos..];
        self.pos += memchr(LINE_FEED, rest).unwrap_or(rest.len());
        Step::Emit(kind)
    }

    fn scan_block_comment(&mut self) -> Step {
        let start = self.pos;
        self.pos += 2; // skip /*
        let rest = &self.bytes()[self.pos..];
        match memmem::find(rest, b"*/") {
            Some(offset) => self.pos += offset + 2,
            None => {
                debug!(start, "unterminated block comment");
                self.pos = self.text.len();
            }
        }
        Step::Emit(TokenKind::BlockComment)
    }

    fn scan_word(&mut self) -> Step {
        let start = self.pos;
        self.pos += 1;
        while !self.is_eof() && is_word_part(self.current()) {
            self.pos += 1;
        }
        match classify(&self.text[start..self.pos]) {
            Some(keyword) => Step::Emit(TokenKind::Keyword(keyword)),
            None => Step::Emit(TokenKind::Identifier),
        }
    }

    fn scan_number(&mut self) -> Step {
        if self.options.extended_numbers {
            return self.scan_extended_number();
        }
        while !self.is_eof() && (is_digit(self.current()) || self.current() == DOT) {
            self.pos += 1;
        }
        Step::Emit(TokenKind::Number)
    }

    /// `0x`/`0X` prefix, then any run of letters, digits and dots. Outside a
    /// hex literal an `e`/`E` directly followed by a sign and a digit takes
    /// the sign along as an exponent.
    fn scan_extended_number(&mut self) -> Step {
        let is_hex = self.current() == b'0' && matches!(self.byte_at(1), Some(b'x' | b'X'));
        if is_hex {
            self.pos += 2;
        }
        while !self.is_eof() {
            let ch = self.current();
            if !is_hex
                && matches!(ch, b'e' | b'E')
                && matches!(self.byte_at(1), Some(PLUS | MINUS))
                && self.byte_at(2).is_some_and(is_digit)
            {
                self.pos += 2;
            } else if ch.is_ascii_alphanumeric() || ch == DOT {
                self.pos += 1;
            } else {
                break;
            }
        }
        Step::Emit(TokenKind::Number)
    }

    fn scan_member_access(&mut self, ch: u8, next: Option<u8>) -> Option<Step> {
        let refine = self.options.member_access_kinds;
        if ch == MINUS && next == Some(GREATER_THAN) {
            let kind = if refine { TokenKind::ArrowAccess } else { TokenKind::Punctuation };
            Some(self.consume(2, kind))
        } else if ch == DOT {
            let kind = if refine { TokenKind::DotAccess } else { TokenKind::Punctuation };
            Some(self.consume(1, kind))
        } else {
            None
        }
    }

    /// Scan a quoted literal. A backslash escapes the following character,
    /// whatever it is. The closing quote is included when present.
    fn scan_quoted(&mut self, quote: u8, kind: TokenKind) -> Step {
        let start = self.pos;
        self.pos += 1; // skip opening quote
        loop {
            if self.is_eof() {
                debug!(start, ?kind, "unterminated literal");
                break;
            }
            let ch = self.current();
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == BACKSLASH {
                self.pos += 1;
                if !self.is_eof() {
                    self.pos += self.current_char_len();
                }
                continue;
            }
            self.pos += self.current_char_len();
        }
        Step::Emit(kind)
    }

    fn scan_unknown(&mut self) -> Step {
        let len = self.current_char_len();
        debug!(pos = self.pos, text = &self.text[self.pos..self.pos + len], "unknown character");
        self.pos += len;
        Step::Emit(TokenKind::Unknown)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::Keyword;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).into_iter().map(|t| t.kind).collect()
    }

    fn lexemes(source: &str) -> Vec<String> {
        scan(source).into_iter().map(|t| t.lexeme).collect()
    }

    #[test]
    fn test_rules_cover_every_variant_once() {
        for (i, rule) in RULES.iter().enumerate() {
            assert!(!RULES[i + 1..].contains(rule), "{rule:?} listed twice");
        }
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            kinds("( ) { } [ ] ; , :"),
            vec![TokenKind::Punctuation; 9]
        );
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(
            lexemes("<< >> <= >= == != ++ -- **"),
            vec!["<<", ">>", "<=", ">=", "==", "!=", "++", "--", "**"]
        );
        assert!(kinds("<< >> <= >= == != ++ -- **")
            .iter()
            .all(|&k| k == TokenKind::Operator));
    }

    #[test]
    fn test_unlisted_pairs_split() {
        // `&&`, `||`, `+=` are not two-character operators in this dialect.
        assert_eq!(lexemes("&& || +="), vec!["&", "&", "|", "|", "+", "="]);
    }

    #[test]
    fn test_greedy_pairing_left_to_right() {
        assert_eq!(lexemes("a<<=b"), vec!["a", "<<", "=", "b"]);
        assert_eq!(lexemes("***"), vec!["**", "*"]);
        assert_eq!(lexemes("x--->y"), vec!["x", "--", "->", "y"]);
    }

    #[test]
    fn test_scan_identifier_and_keyword() {
        let tokens = scan("int x = 42;");
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Int));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "x");
        assert_eq!(tokens[2].kind, TokenKind::Operator);
        assert_eq!(tokens[3].kind, TokenKind::Number);
        assert_eq!(tokens[3].lexeme, "42");
        assert_eq!(tokens[4].kind, TokenKind::Punctuation);
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_number_digits_and_dots() {
        assert_eq!(lexemes("3.14 1.2.3 0xFF"), vec!["3.14", "1.2.3", "0", "xFF"]);
        assert_eq!(
            kinds("0xFF"),
            vec![TokenKind::Number, TokenKind::Identifier]
        );
        // A leading dot is member access, not part of the number.
        assert_eq!(lexemes(".5"), vec![".", "5"]);
    }

    #[test]
    fn test_extended_numbers() {
        let options = ScanOptions {
            extended_numbers: true,
            ..ScanOptions::default()
        };
        let tokens = Scanner::with_options("0xFF 1.5e-3 2E+8 10u 3.0f x-1", options).scan();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(
            lexemes,
            vec!["0xFF", "1.5e-3", "2E+8", "10u", "3.0f", "x", "-", "1"]
        );
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[1].kind, TokenKind::Number);
    }

    #[test]
    fn test_extended_exponent_needs_digit_after_sign() {
        let options = ScanOptions {
            extended_numbers: true,
            ..ScanOptions::default()
        };
        let lexemes: Vec<_> = Scanner::with_options("1e-x 0xE-1", options)
            .map(|t| t.lexeme)
            .collect();
        assert_eq!(lexemes, vec!["1e", "-", "x", "0xE", "-", "1"]);
    }

    #[test]
    fn test_member_access_refinement() {
        let options = ScanOptions {
            member_access_kinds: true,
            ..ScanOptions::default()
        };
        let kinds: Vec<_> = Scanner::with_options("a->b.c", options)
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::ArrowAccess,
                TokenKind::Identifier,
                TokenKind::DotAccess,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_directive_stops_before_newline() {
        let tokens = scan("#include <vector>\r\nint");
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].lexeme, "#include <vector>\r");
        assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Int));
    }

    #[test]
    fn test_directive_wins_over_everything_on_its_line() {
        let tokens = scan("#define X /* not a comment */ \"s\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Directive);
    }

    #[test]
    fn test_block_comment_does_not_nest() {
        assert_eq!(
            lexemes("/* a /* b */ c */"),
            vec!["/* a /* b */", "c", "*", "/"]
        );
    }

    #[test]
    fn test_block_comment_opener_is_not_closer() {
        let tokens = scan("/*/");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[0].lexeme, "/*/");
    }

    #[test]
    fn test_escaped_backslash_closes_literal() {
        assert_eq!(lexemes(r#""a\\" x"#), vec![r#""a\\""#, "x"]);
        assert_eq!(kinds(r"'\''"), vec![TokenKind::CharLiteral]);
    }

    #[test]
    fn test_non_ascii_is_one_unknown_per_char() {
        let tokens = scan("é€");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Unknown);
        assert_eq!(tokens[0].lexeme, "é");
        assert_eq!(tokens[1].lexeme, "€");
    }

    #[test]
    fn test_non_ascii_inside_string_literal() {
        let tokens = scan("\"héllo\\é\" x");
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].lexeme, "\"héllo\\é\"");
        assert_eq!(tokens[1].lexeme, "x");
    }

    #[test]
    fn test_spans_track_byte_offsets() {
        let tokens = scan("  ab ::\n c");
        assert_eq!(tokens[0].span, TextSpan::new(2, 2));
        assert_eq!(tokens[1].span, TextSpan::new(5, 2));
        assert_eq!(tokens[2].span, TextSpan::new(9, 1));
    }

    #[test]
    fn test_next_token_is_incremental() {
        let mut scanner = Scanner::new("a b");
        assert_eq!(scanner.next_token().map(|t| t.lexeme), Some("a".into()));
        assert_eq!(scanner.pos, 1);
        assert_eq!(scanner.next_token().map(|t| t.lexeme), Some("b".into()));
        assert_eq!(scanner.next_token(), None);
        assert_eq!(scanner.next_token(), None);
    }
}
