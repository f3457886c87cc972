//! Tokenizer for the bootstrap frontend.
//!
//! Lexing never stops at the first problem: unknown characters and broken
//! literals become [`TokenKind::Garbage`] plus a diagnostic, and scanning
//! continues so later phases can still report their own errors.

mod token;

use jakt_core::{FileId, Span};
pub use token::{Token, TokenKind};

use crate::pipeline::Diagnostic;

const PHASE: &str = "lex";

/// Split `source` into tokens. The last token is always [`TokenKind::Eof`].
pub fn lex(file_id: FileId, source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer {
        file_id,
        source,
        pos: 0,
        diagnostics: Vec::new(),
    };

    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    (tokens, lexer.diagnostics)
}

struct Lexer<'a> {
    file_id: FileId,
    source: &'a str,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn span(&self, start: usize) -> Span {
        Span::new(self.file_id, start, self.pos)
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::error(PHASE, message, span));
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r') => {
                    self.bump();
                }
                Some('/') if self.source[self.pos..].starts_with("//") => {
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.pos;
        let Some(c) = self.bump() else {
            return Token::new(TokenKind::Eof, self.span(start));
        };

        let kind = match c {
            '\n' => TokenKind::Eol,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LCurly,
            '}' => TokenKind::RCurly,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Equal,
            '-' if self.peek() == Some('>') => {
                self.bump();
                TokenKind::Arrow
            }
            '"' => self.lex_string(start),
            c if c.is_ascii_digit() => self.lex_number(start),
            c if c.is_alphabetic() || c == '_' => self.lex_name(start),
            other => {
                let span = self.span(start);
                self.error(format!("unknown character '{}'", other), span);
                TokenKind::Garbage
            }
        };

        Token::new(kind, self.span(start))
    }

    fn lex_name(&mut self, start: usize) -> TokenKind {
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let name = &self.source[start..self.pos];
        TokenKind::keyword(name).unwrap_or_else(|| TokenKind::Name(name.to_string()))
    }

    fn lex_number(&mut self, start: usize) -> TokenKind {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        match self.source[start..self.pos].parse() {
            Ok(value) => TokenKind::Number(value),
            Err(_) => {
                let span = self.span(start);
                self.error("integer literal out of range", span);
                TokenKind::Garbage
            }
        }
    }

    /// Lex a string literal; the opening quote is already consumed.
    fn lex_string(&mut self, start: usize) -> TokenKind {
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    let span = self.span(start);
                    self.error("unterminated string literal", span);
                    return TokenKind::Garbage;
                }
                Some('"') => {
                    self.bump();
                    return TokenKind::QuotedString(value);
                }
                Some('\\') => {
                    let escape_start = self.pos;
                    self.bump();
                    match self.peek() {
                        Some('n') => value.push('\n'),
                        Some('t') => value.push('\t'),
                        Some('r') => value.push('\r'),
                        Some('0') => value.push('\0'),
                        Some('"') => value.push('"'),
                        Some('\\') => value.push('\\'),
                        // Reported as unterminated on the next iteration.
                        None | Some('\n') => continue,
                        Some(other) => {
                            self.bump();
                            let span = self.span(escape_start);
                            self.error(format!("unknown escape sequence '\\{}'", other), span);
                            continue;
                        }
                    }
                    self.bump();
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, diagnostics) = lex(FileId::new(0), source);
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_hello_world() {
        assert_eq!(
            kinds("function main() {\n    println(\"hi\")\n}"),
            vec![
                TokenKind::Function,
                TokenKind::Name("main".into()),
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LCurly,
                TokenKind::Eol,
                TokenKind::Name("println".into()),
                TokenKind::LParen,
                TokenKind::QuotedString("hi".into()),
                TokenKind::RParen,
                TokenKind::Eol,
                TokenKind::RCurly,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_punctuation_and_keywords() {
        assert_eq!(
            kinds("let x = 42; return -> , :"),
            vec![
                TokenKind::Let,
                TokenKind::Name("x".into()),
                TokenKind::Equal,
                TokenKind::Number(42),
                TokenKind::Semicolon,
                TokenKind::Return,
                TokenKind::Arrow,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_skips_comments() {
        assert_eq!(
            kinds("// leading\nfoo // trailing"),
            vec![
                TokenKind::Eol,
                TokenKind::Name("foo".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_string_escapes() {
        assert_eq!(
            kinds(r#""a\n\t\"b\\""#),
            vec![TokenKind::QuotedString("a\n\t\"b\\".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_lex_spans() {
        let (tokens, _) = lex(FileId::new(2), "  main");
        assert_eq!(tokens[0].span, Span::new(FileId::new(2), 2, 6));
        assert_eq!(tokens[1].span, Span::new(FileId::new(2), 6, 6));
    }

    #[test]
    fn test_lex_unknown_character_continues() {
        let (tokens, diagnostics) = lex(FileId::new(0), "a $ b");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "unknown character '$'");
        assert_eq!(diagnostics[0].span.start, 2);
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Name("a".into()),
                TokenKind::Garbage,
                TokenKind::Name("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_unterminated_string() {
        let (tokens, diagnostics) = lex(FileId::new(0), "\"abc\nx");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "unterminated string literal");
        assert_eq!(tokens[0].kind, TokenKind::Garbage);
        assert_eq!(tokens[1].kind, TokenKind::Eol);
    }

    #[test]
    fn test_lex_unknown_escape() {
        let (tokens, diagnostics) = lex(FileId::new(0), r#""a\qb""#);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "unknown escape sequence '\\q'");
        assert_eq!(tokens[0].kind, TokenKind::QuotedString("ab".into()));
    }

    #[test]
    fn test_lex_number_out_of_range() {
        let (tokens, diagnostics) = lex(FileId::new(0), "99999999999999999999");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Garbage);
    }

    #[test]
    fn test_lex_lone_minus_is_garbage() {
        let (_, diagnostics) = lex(FileId::new(0), "-");
        assert_eq!(diagnostics[0].message, "unknown character '-'");
    }
}
