//! Checked program produced by the typechecker.

use std::fmt;

use jakt_core::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Void,
    I64,
    String,
    /// Type of an expression that already failed to check.
    Unknown,
}

impl Type {
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "void" => Some(Type::Void),
            "i64" => Some(Type::I64),
            "String" => Some(Type::String),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::I64 => write!(f, "i64"),
            Type::String => write!(f, "String"),
            Type::Unknown => write!(f, "<unknown>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckedProgram {
    pub functions: Vec<CheckedFunction>,
}

impl CheckedProgram {
    pub fn function(&self, name: &str) -> Option<&CheckedFunction> {
        self.functions.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedFunction {
    pub name: String,
    pub return_type: Type,
    pub body: Vec<CheckedStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckedStatement {
    Let {
        name: String,
        ty: Type,
        init: CheckedExpression,
        span: Span,
    },
    Return {
        value: Option<CheckedExpression>,
        span: Span,
    },
    Expression {
        expr: CheckedExpression,
        span: Span,
    },
}

impl CheckedStatement {
    pub fn span(&self) -> Span {
        match self {
            CheckedStatement::Let { span, .. }
            | CheckedStatement::Return { span, .. }
            | CheckedStatement::Expression { span, .. } => *span,
        }
    }
}

/// Where a print builtin writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintTarget {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckedExpression {
    /// Call to a user-defined function.
    Call { name: String, ty: Type },
    /// `println`/`eprintln`. `pieces` holds the literal text around each
    /// `{}` placeholder, so it is always one longer than `args`.
    Print {
        target: PrintTarget,
        pieces: Vec<String>,
        args: Vec<CheckedExpression>,
    },
    Var { name: String, ty: Type },
    Number(i64),
    QuotedString(String),
    Garbage,
}

impl CheckedExpression {
    pub fn ty(&self) -> Type {
        match self {
            CheckedExpression::Call { ty, .. } | CheckedExpression::Var { ty, .. } => *ty,
            CheckedExpression::Print { .. } => Type::Void,
            CheckedExpression::Number(_) => Type::I64,
            CheckedExpression::QuotedString(_) => Type::String,
            CheckedExpression::Garbage => Type::Unknown,
        }
    }
}
