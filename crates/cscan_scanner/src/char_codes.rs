//! Character code constants and byte classes used by the scanner.
//!
//! The scanned dialect is ASCII-only: every class below answers `false` for
//! bytes >= 0x80, so non-ASCII scalars fall through to the `Unknown` rule.

pub const TAB: u8 = b'\t';
pub const LINE_FEED: u8 = b'\n';
pub const VERTICAL_TAB: u8 = 0x0B;
pub const FORM_FEED: u8 = 0x0C;
pub const CARRIAGE_RETURN: u8 = b'\r';
pub const SPACE: u8 = b' ';

pub const DOUBLE_QUOTE: u8 = b'"';
pub const HASH: u8 = b'#';
pub const SINGLE_QUOTE: u8 = b'\'';
pub const ASTERISK: u8 = b'*';
pub const PLUS: u8 = b'+';
pub const MINUS: u8 = b'-';
pub const DOT: u8 = b'.';
pub const SLASH: u8 = b'/';
pub const COLON: u8 = b':';
pub const GREATER_THAN: u8 = b'>';
pub const BACKSLASH: u8 = b'\\';
pub const UNDERSCORE: u8 = b'_';

/// Two-character operators, longest-match candidates checked before any
/// single-character operator.
pub const MULTI_CHAR_OPERATORS: [[u8; 2]; 9] = [
    *b"<<", *b">>", *b"<=", *b">=", *b"==", *b"!=", *b"++", *b"--", *b"**",
];

/// Check if a byte is skipped as whitespace (C `isspace` in the "C" locale).
#[inline]
pub fn is_white_space(b: u8) -> bool {
    matches!(
        b,
        SPACE | TAB | LINE_FEED | CARRIAGE_RETURN | VERTICAL_TAB | FORM_FEED
    )
}

/// Check if a byte can start a word (identifier or keyword).
#[inline]
pub fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == UNDERSCORE
}

/// Check if a byte can continue a word.
#[inline]
pub fn is_word_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == UNDERSCORE
}

/// Check if a byte is a decimal digit.
#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Check if a byte is a single-character operator.
#[inline]
pub fn is_operator(b: u8) -> bool {
    matches!(
        b,
        b'+' | b'-' | b'*' | b'/' | b'=' | b'<' | b'>' | b'!' | b'&' | b'|' | b'^' | b'%' | b'~'
    )
}

/// Check if `first` and `second` form one of [`MULTI_CHAR_OPERATORS`].
#[inline]
pub fn is_multi_char_operator(first: u8, second: u8) -> bool {
    MULTI_CHAR_OPERATORS.contains(&[first, second])
}

/// Check if a byte is generic punctuation: any ASCII punctuation that is
/// not a quote character.
#[inline]
pub fn is_punctuation(b: u8) -> bool {
    b.is_ascii_punctuation() && b != DOUBLE_QUOTE && b != SINGLE_QUOTE
}
