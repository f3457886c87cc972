//! Recursive-descent parser for the bootstrap frontend.
//!
//! Like the lexer, the parser records problems and keeps going: it
//! resynchronizes at the next statement terminator or `function` keyword.

mod ast;

pub use ast::{ParsedBlock, ParsedExpression, ParsedFile, ParsedFunction, ParsedStatement};
use jakt_core::{FileId, Span};

use crate::{
    lexer::{Token, TokenKind},
    pipeline::Diagnostic,
};

const PHASE: &str = "parse";

/// Parse a token stream produced by [`crate::lexer::lex`].
pub fn parse(tokens: &[Token]) -> (ParsedFile, Vec<Diagnostic>) {
    let eof_span = tokens
        .last()
        .map(|t| Span::new(t.span.file_id, t.span.end, t.span.end))
        .unwrap_or_else(|| Span::new(FileId::new(0), 0, 0));

    let mut parser = Parser {
        tokens,
        index: 0,
        eof: Token::new(TokenKind::Eof, eof_span),
        diagnostics: Vec::new(),
    };
    let file = parser.parse_file();
    (file, parser.diagnostics)
}

struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    eof: Token,
    diagnostics: Vec<Diagnostic>,
}

impl Parser<'_> {
    fn current(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::error(PHASE, message, span));
    }

    fn error_here(&mut self, expected: &str) {
        let token = self.current().clone();
        self.error(format!("expected {}, found {}", expected, token.kind), token.span);
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> bool {
        if *self.kind() == kind {
            self.advance();
            true
        } else {
            self.error_here(expected);
            false
        }
    }

    fn skip_newlines(&mut self) {
        while *self.kind() == TokenKind::Eol {
            self.advance();
        }
    }

    fn parse_file(&mut self) -> ParsedFile {
        let mut file = ParsedFile::default();
        loop {
            self.skip_newlines();
            match self.kind() {
                TokenKind::Eof => break,
                TokenKind::Function => {
                    if let Some(function) = self.parse_function() {
                        file.functions.push(function);
                    }
                }
                _ => {
                    self.error_here("'function'");
                    while !matches!(self.kind(), TokenKind::Function | TokenKind::Eof) {
                        self.advance();
                    }
                }
            }
        }
        file
    }

    fn parse_function(&mut self) -> Option<ParsedFunction> {
        // 'function'
        self.advance();

        let header = self.parse_function_header();
        self.skip_newlines();

        let Some((name, name_span, return_type)) = header else {
            // Skip the body of a function whose header is broken.
            while !matches!(
                self.kind(),
                TokenKind::LCurly | TokenKind::Function | TokenKind::Eof
            ) {
                self.advance();
            }
            if *self.kind() == TokenKind::LCurly {
                self.parse_block();
            }
            return None;
        };

        let body = self.parse_block();
        Some(ParsedFunction {
            name,
            name_span,
            return_type,
            body,
        })
    }

    #[allow(clippy::type_complexity)]
    fn parse_function_header(&mut self) -> Option<(String, Span, Option<(String, Span)>)> {
        let token = self.current().clone();
        let TokenKind::Name(name) = token.kind else {
            self.error_here("function name");
            return None;
        };
        self.advance();

        if !self.expect(TokenKind::LParen, "'('") || !self.expect(TokenKind::RParen, "')'") {
            return None;
        }

        let mut return_type = None;
        if *self.kind() == TokenKind::Arrow {
            self.advance();
            let token = self.current().clone();
            let TokenKind::Name(type_name) = token.kind else {
                self.error_here("return type");
                return None;
            };
            self.advance();
            return_type = Some((type_name, token.span));
        }

        Some((name, token.span, return_type))
    }

    fn parse_block(&mut self) -> ParsedBlock {
        let mut block = ParsedBlock::default();
        if !self.expect(TokenKind::LCurly, "'{'") {
            return block;
        }

        loop {
            while matches!(self.kind(), TokenKind::Eol | TokenKind::Semicolon) {
                self.advance();
            }
            match self.kind() {
                TokenKind::RCurly => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    self.error_here("'}'");
                    break;
                }
                _ => {}
            }

            let before = self.index;
            let statement = self.parse_statement();
            block.statements.push(statement);

            if !self.kind().is_terminator() {
                self.error_here("end of statement");
                while !self.kind().is_terminator() {
                    self.advance();
                }
            }
            if self.index == before {
                self.advance();
            }
        }
        block
    }

    fn parse_statement(&mut self) -> ParsedStatement {
        match self.kind() {
            TokenKind::Let => {
                self.advance();
                let token = self.current().clone();
                let TokenKind::Name(name) = token.kind else {
                    self.error_here("variable name");
                    return ParsedStatement::Expression(ParsedExpression::Garbage(token.span));
                };
                self.advance();

                let init = if self.expect(TokenKind::Equal, "'='") {
                    self.parse_expression()
                } else {
                    ParsedExpression::Garbage(self.current().span)
                };
                ParsedStatement::Let {
                    name,
                    name_span: token.span,
                    init,
                }
            }
            TokenKind::Return => {
                let span = self.current().span;
                self.advance();
                if self.kind().is_terminator() {
                    ParsedStatement::Return { value: None, span }
                } else {
                    let value = self.parse_expression();
                    ParsedStatement::Return {
                        span: span.to(value.span()),
                        value: Some(value),
                    }
                }
            }
            _ => ParsedStatement::Expression(self.parse_expression()),
        }
    }

    fn parse_expression(&mut self) -> ParsedExpression {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Number(value) => {
                self.advance();
                ParsedExpression::Number(value, token.span)
            }
            TokenKind::QuotedString(value) => {
                self.advance();
                ParsedExpression::QuotedString(value, token.span)
            }
            TokenKind::Name(name) => {
                self.advance();
                if *self.kind() != TokenKind::LParen {
                    return ParsedExpression::Var(name, token.span);
                }
                self.advance();
                let (args, end) = self.parse_call_args();
                ParsedExpression::Call {
                    name,
                    args,
                    span: token.span.to(end),
                }
            }
            // Already reported by the lexer.
            TokenKind::Garbage => {
                self.advance();
                ParsedExpression::Garbage(token.span)
            }
            other => {
                self.error_here("expression");
                if !other.is_terminator() && other != TokenKind::RParen {
                    self.advance();
                }
                ParsedExpression::Garbage(token.span)
            }
        }
    }

    /// Parse call arguments; the opening parenthesis is already consumed.
    fn parse_call_args(&mut self) -> (Vec<ParsedExpression>, Span) {
        let mut args = Vec::new();
        self.skip_newlines();
        if *self.kind() == TokenKind::RParen {
            let end = self.current().span;
            self.advance();
            return (args, end);
        }

        loop {
            args.push(self.parse_expression());
            self.skip_newlines();
            match self.kind() {
                TokenKind::Comma => {
                    self.advance();
                    self.skip_newlines();
                }
                TokenKind::RParen => {
                    let end = self.current().span;
                    self.advance();
                    return (args, end);
                }
                _ => {
                    let end = self.current().span;
                    self.error_here("',' or ')'");
                    return (args, end);
                }
            }
        }
    }
}
