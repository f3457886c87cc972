//! Parsed syntax tree.

use jakt_core::Span;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFile {
    pub functions: Vec<ParsedFunction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFunction {
    pub name: String,
    pub name_span: Span,
    /// Declared return type name, `None` when omitted.
    pub return_type: Option<(String, Span)>,
    pub body: ParsedBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedBlock {
    pub statements: Vec<ParsedStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedStatement {
    Let {
        name: String,
        name_span: Span,
        init: ParsedExpression,
    },
    Return {
        value: Option<ParsedExpression>,
        span: Span,
    },
    Expression(ParsedExpression),
}

impl ParsedStatement {
    pub fn span(&self) -> Span {
        match self {
            ParsedStatement::Let {
                name_span, init, ..
            } => name_span.to(init.span()),
            ParsedStatement::Return { span, .. } => *span,
            ParsedStatement::Expression(expr) => expr.span(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedExpression {
    Call {
        name: String,
        args: Vec<ParsedExpression>,
        span: Span,
    },
    Var(String, Span),
    Number(i64, Span),
    QuotedString(String, Span),
    /// Placeholder for an expression that failed to parse.
    Garbage(Span),
}

impl ParsedExpression {
    pub fn span(&self) -> Span {
        match self {
            ParsedExpression::Call { span, .. }
            | ParsedExpression::Var(_, span)
            | ParsedExpression::Number(_, span)
            | ParsedExpression::QuotedString(_, span)
            | ParsedExpression::Garbage(span) => *span,
        }
    }
}
