use std::fmt;

use jakt_core::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Name(String),
    Number(i64),
    QuotedString(String),

    // Keywords
    Function,
    Let,
    Return,

    // Punctuation
    LParen,
    RParen,
    LCurly,
    RCurly,
    Comma,
    Semicolon,
    Colon,
    Equal,
    Arrow,

    Eol,
    Eof,
    Garbage,
}

impl TokenKind {
    pub(crate) fn keyword(name: &str) -> Option<Self> {
        match name {
            "function" => Some(TokenKind::Function),
            "let" => Some(TokenKind::Let),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Whether this token ends a statement.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            TokenKind::Eol | TokenKind::Semicolon | TokenKind::RCurly | TokenKind::Eof
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Name(name) => write!(f, "name '{}'", name),
            TokenKind::Number(value) => write!(f, "number {}", value),
            TokenKind::QuotedString(value) => write!(f, "string {:?}", value),
            TokenKind::Function => write!(f, "'function'"),
            TokenKind::Let => write!(f, "'let'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LCurly => write!(f, "'{{'"),
            TokenKind::RCurly => write!(f, "'}}'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Equal => write!(f, "'='"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::Eol => write!(f, "end of line"),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Garbage => write!(f, "garbage"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}..{}", self.kind, self.span.start, self.span.end)
    }
}
