//! Reserved words of the scanned dialect.
//!
//! [`KEYWORDS`] is the single definition of the keyword set. The lookup map,
//! [`Keyword::ALL`] and [`Keyword::as_str`] are all checked against it, so a
//! reserved word can never be scanned without its own [`Keyword`] sub-tag.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// A reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Asm,
    Auto,
    Bool,
    Break,
    Case,
    Catch,
    Char,
    Class,
    Const,
    Continue,
    Default,
    Delete,
    Do,
    Double,
    Else,
    Enum,
    Extern,
    Float,
    For,
    Friend,
    Goto,
    If,
    Inline,
    Int,
    Long,
    Namespace,
    New,
    Override,
    Private,
    Protected,
    Public,
    Register,
    Return,
    Short,
    Signed,
    Sizeof,
    Static,
    Struct,
    Switch,
    Template,
    This,
    Throw,
    Try,
    Typedef,
    Union,
    Unsigned,
    Using,
    Virtual,
    Void,
    Volatile,
    While,
}

/// The keyword set: reserved word → sub-tag.
pub const KEYWORDS: &[(&str, Keyword)] = &[
    ("asm", Keyword::Asm),
    ("auto", Keyword::Auto),
    ("bool", Keyword::Bool),
    ("break", Keyword::Break),
    ("case", Keyword::Case),
    ("catch", Keyword::Catch),
    ("char", Keyword::Char),
    ("class", Keyword::Class),
    ("const", Keyword::Const),
    ("continue", Keyword::Continue),
    ("default", Keyword::Default),
    ("delete", Keyword::Delete),
    ("do", Keyword::Do),
    ("double", Keyword::Double),
    ("else", Keyword::Else),
    ("enum", Keyword::Enum),
    ("extern", Keyword::Extern),
    ("float", Keyword::Float),
    ("for", Keyword::For),
    ("friend", Keyword::Friend),
    ("goto", Keyword::Goto),
    ("if", Keyword::If),
    ("inline", Keyword::Inline),
    ("int", Keyword::Int),
    ("long", Keyword::Long),
    ("namespace", Keyword::Namespace),
    ("new", Keyword::New),
    ("override", Keyword::Override),
    ("private", Keyword::Private),
    ("protected", Keyword::Protected),
    ("public", Keyword::Public),
    ("register", Keyword::Register),
    ("return", Keyword::Return),
    ("short", Keyword::Short),
    ("signed", Keyword::Signed),
    ("sizeof", Keyword::Sizeof),
    ("static", Keyword::Static),
    ("struct", Keyword::Struct),
    ("switch", Keyword::Switch),
    ("template", Keyword::Template),
    ("this", Keyword::This),
    ("throw", Keyword::Throw),
    ("try", Keyword::Try),
    ("typedef", Keyword::Typedef),
    ("union", Keyword::Union),
    ("unsigned", Keyword::Unsigned),
    ("using", Keyword::Using),
    ("virtual", Keyword::Virtual),
    ("void", Keyword::Void),
    ("volatile", Keyword::Volatile),
    ("while", Keyword::While),
];

fn keyword_map() -> &'static FxHashMap<&'static str, Keyword> {
    static MAP: OnceLock<FxHashMap<&'static str, Keyword>> = OnceLock::new();
    MAP.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// Look up the keyword sub-tag for a word, or `None` for an identifier.
pub fn classify(word: &str) -> Option<Keyword> {
    keyword_map().get(word).copied()
}

impl Keyword {
    /// Every keyword sub-tag, in table order.
    pub const ALL: [Keyword; KEYWORDS.len()] = {
        let mut all = [Keyword::Asm; KEYWORDS.len()];
        let mut i = 0;
        while i < KEYWORDS.len() {
            all[i] = KEYWORDS[i].1;
            i += 1;
        }
        all
    };

    /// The reserved word for this keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Asm => "asm",
            Keyword::Auto => "auto",
            Keyword::Bool => "bool",
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Char => "char",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::Do => "do",
            Keyword::Double => "double",
            Keyword::Else => "else",
            Keyword::Enum => "enum",
            Keyword::Extern => "extern",
            Keyword::Float => "float",
            Keyword::For => "for",
            Keyword::Friend => "friend",
            Keyword::Goto => "goto",
            Keyword::If => "if",
            Keyword::Inline => "inline",
            Keyword::Int => "int",
            Keyword::Long => "long",
            Keyword::Namespace => "namespace",
            Keyword::New => "new",
            Keyword::Override => "override",
            Keyword::Private => "private",
            Keyword::Protected => "protected",
            Keyword::Public => "public",
            Keyword::Register => "register",
            Keyword::Return => "return",
            Keyword::Short => "short",
            Keyword::Signed => "signed",
            Keyword::Sizeof => "sizeof",
            Keyword::Static => "static",
            Keyword::Struct => "struct",
            Keyword::Switch => "switch",
            Keyword::Template => "template",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::Try => "try",
            Keyword::Typedef => "typedef",
            Keyword::Union => "union",
            Keyword::Unsigned => "unsigned",
            Keyword::Using => "using",
            Keyword::Virtual => "virtual",
            Keyword::Void => "void",
            Keyword::Volatile => "volatile",
            Keyword::While => "while",
        }
    }

    /// Stable display name, e.g. `TOK_INT`.
    pub fn token_name(self) -> &'static str {
        match self {
            Keyword::Asm => "TOK_ASM",
            Keyword::Auto => "TOK_AUTO",
            Keyword::Bool => "TOK_BOOL",
            Keyword::Break => "TOK_BREAK",
            Keyword::Case => "TOK_CASE",
            Keyword::Catch => "TOK_CATCH",
            Keyword::Char => "TOK_CHAR",
            Keyword::Class => "TOK_CLASS",
            Keyword::Const => "TOK_CONST",
            Keyword::Continue => "TOK_CONTINUE",
            Keyword::Default => "TOK_DEFAULT",
            Keyword::Delete => "TOK_DELETE",
            Keyword::Do => "TOK_DO",
            Keyword::Double => "TOK_DOUBLE",
            Keyword::Else => "TOK_ELSE",
            Keyword::Enum => "TOK_ENUM",
            Keyword::Extern => "TOK_EXTERN",
            Keyword::Float => "TOK_FLOAT",
            Keyword::For => "TOK_FOR",
            Keyword::Friend => "TOK_FRIEND",
            Keyword::Goto => "TOK_GOTO",
            Keyword::If => "TOK_IF",
            Keyword::Inline => "TOK_INLINE",
            Keyword::Int => "TOK_INT",
            Keyword::Long => "TOK_LONG",
            Keyword::Namespace => "TOK_NAMESPACE",
            Keyword::New => "TOK_NEW",
            Keyword::Override => "TOK_OVERRIDE",
            Keyword::Private => "TOK_PRIVATE",
            Keyword::Protected => "TOK_PROTECTED",
            Keyword::Public => "TOK_PUBLIC",
            Keyword::Register => "TOK_REGISTER",
            Keyword::Return => "TOK_RETURN",
            Keyword::Short => "TOK_SHORT",
            Keyword::Signed => "TOK_SIGNED",
            Keyword::Sizeof => "TOK_SIZEOF",
            Keyword::Static => "TOK_STATIC",
            Keyword::Struct => "TOK_STRUCT",
            Keyword::Switch => "TOK_SWITCH",
            Keyword::Template => "TOK_TEMPLATE",
            Keyword::This => "TOK_THIS",
            Keyword::Throw => "TOK_THROW",
            Keyword::Try => "TOK_TRY",
            Keyword::Typedef => "TOK_TYPEDEF",
            Keyword::Union => "TOK_UNION",
            Keyword::Unsigned => "TOK_UNSIGNED",
            Keyword::Using => "TOK_USING",
            Keyword::Virtual => "TOK_VIRTUAL",
            Keyword::Void => "TOK_VOID",
            Keyword::Volatile => "TOK_VOLATILE",
            Keyword::While => "TOK_WHILE",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
