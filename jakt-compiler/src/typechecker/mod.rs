//! Typechecker for the bootstrap frontend.
//!
//! Checking happens in two passes: function signatures are collected first
//! so bodies may call functions defined later in the file.

mod checked;

pub use checked::{
    CheckedExpression, CheckedFunction, CheckedProgram, CheckedStatement, PrintTarget, Type,
};
use indexmap::IndexMap;
use jakt_core::{FileId, Span};

use crate::{
    parser::{ParsedExpression, ParsedFile, ParsedFunction, ParsedStatement},
    pipeline::Diagnostic,
};

const PHASE: &str = "typecheck";
const BUILTINS: [&str; 2] = ["println", "eprintln"];

/// Check a parsed file. `file_id` is used for diagnostics with no better
/// location, such as a missing `main`.
pub fn typecheck(file_id: FileId, file: &ParsedFile) -> (CheckedProgram, Vec<Diagnostic>) {
    let mut checker = Typechecker {
        signatures: IndexMap::new(),
        diagnostics: Vec::new(),
    };
    let program = checker.check_file(file_id, file);
    (program, checker.diagnostics)
}

struct Signature {
    return_type: Type,
    span: Span,
}

struct Typechecker {
    signatures: IndexMap<String, Signature>,
    diagnostics: Vec<Diagnostic>,
}

impl Typechecker {
    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.diagnostics.push(Diagnostic::error(PHASE, message, span));
    }

    fn check_file(&mut self, file_id: FileId, file: &ParsedFile) -> CheckedProgram {
        for function in &file.functions {
            self.declare(function);
        }

        match self.signatures.get("main") {
            None => self.error("no 'main' function defined", Span::new(file_id, 0, 0)),
            Some(main) if !matches!(main.return_type, Type::Void | Type::I64 | Type::Unknown) => {
                let span = main.span;
                self.error("'main' must return void or i64", span);
            }
            Some(_) => {}
        }

        let mut program = CheckedProgram::default();
        for function in &file.functions {
            if let Some(checked) = self.check_function(function) {
                program.functions.push(checked);
            }
        }
        program
    }

    fn declare(&mut self, function: &ParsedFunction) {
        let return_type = match &function.return_type {
            None => Type::Void,
            Some((name, span)) => Type::from_name(name).unwrap_or_else(|| {
                self.error(format!("unknown type '{}'", name), *span);
                Type::Unknown
            }),
        };

        if BUILTINS.contains(&function.name.as_str()) {
            self.error(
                format!("cannot redefine builtin function '{}'", function.name),
                function.name_span,
            );
            return;
        }

        if let Some(previous) = self.signatures.get(&function.name) {
            let diagnostic = Diagnostic::error(
                PHASE,
                format!("redefinition of function '{}'", function.name),
                function.name_span,
            )
            .with_hint("previous definition here", previous.span);
            self.diagnostics.push(diagnostic);
            return;
        }

        self.signatures.insert(
            function.name.clone(),
            Signature {
                return_type,
                span: function.name_span,
            },
        );
    }

    fn check_function(&mut self, function: &ParsedFunction) -> Option<CheckedFunction> {
        let signature = self.signatures.get(&function.name)?;
        // Only the first definition is checked; later ones were reported.
        if signature.span != function.name_span {
            return None;
        }
        let return_type = signature.return_type;

        let mut scope = Scope::default();
        let mut body = Vec::new();
        let mut returns = false;
        for statement in &function.body.statements {
            returns |= matches!(statement, ParsedStatement::Return { .. });
            body.push(self.check_statement(statement, return_type, &mut scope));
        }

        if !returns && !matches!(return_type, Type::Void | Type::Unknown) {
            self.error(
                format!(
                    "function '{}' must return a value of type {}",
                    function.name, return_type
                ),
                function.name_span,
            );
        }

        Some(CheckedFunction {
            name: function.name.clone(),
            return_type,
            body,
        })
    }

    fn check_statement(
        &mut self,
        statement: &ParsedStatement,
        return_type: Type,
        scope: &mut Scope,
    ) -> CheckedStatement {
        let span = statement.span();
        match statement {
            ParsedStatement::Let {
                name,
                name_span,
                init,
            } => {
                let init = self.check_expression(init, scope);
                let ty = init.ty();
                if ty == Type::Void {
                    self.error(
                        format!("cannot bind a value of type void to '{}'", name),
                        span,
                    );
                }
                if let Some(previous) = scope.get(name) {
                    let diagnostic = Diagnostic::error(
                        PHASE,
                        format!("redefinition of variable '{}'", name),
                        *name_span,
                    )
                    .with_hint("previous definition here", previous.1);
                    self.diagnostics.push(diagnostic);
                }
                scope.insert(name.clone(), (ty, *name_span));
                CheckedStatement::Let {
                    name: name.clone(),
                    ty,
                    init,
                    span,
                }
            }
            ParsedStatement::Return { value, span } => {
                let value = value.as_ref().map(|v| self.check_expression(v, scope));
                let ty = value.as_ref().map_or(Type::Void, CheckedExpression::ty);
                if ty != return_type && ty != Type::Unknown && return_type != Type::Unknown {
                    self.error(
                        format!(
                            "return type mismatch: expected {}, found {}",
                            return_type, ty
                        ),
                        *span,
                    );
                }
                CheckedStatement::Return { value, span: *span }
            }
            ParsedStatement::Expression(expr) => CheckedStatement::Expression {
                expr: self.check_expression(expr, scope),
                span,
            },
        }
    }

    fn check_expression(&mut self, expr: &ParsedExpression, scope: &Scope) -> CheckedExpression {
        match expr {
            ParsedExpression::Number(value, _) => CheckedExpression::Number(*value),
            ParsedExpression::QuotedString(value, _) => {
                CheckedExpression::QuotedString(value.clone())
            }
            ParsedExpression::Var(name, span) => match scope.get(name) {
                Some((ty, _)) => CheckedExpression::Var {
                    name: name.clone(),
                    ty: *ty,
                },
                None => {
                    self.error(format!("unknown variable '{}'", name), *span);
                    CheckedExpression::Garbage
                }
            },
            ParsedExpression::Garbage(_) => CheckedExpression::Garbage,
            ParsedExpression::Call { name, args, span } => match name.as_str() {
                "println" => self.check_print(PrintTarget::Stdout, name, args, *span, scope),
                "eprintln" => self.check_print(PrintTarget::Stderr, name, args, *span, scope),
                _ => self.check_call(name, args, *span, scope),
            },
        }
    }

    fn check_call(
        &mut self,
        name: &str,
        args: &[ParsedExpression],
        span: Span,
        scope: &Scope,
    ) -> CheckedExpression {
        for arg in args {
            self.check_expression(arg, scope);
        }

        let Some(signature) = self.signatures.get(name) else {
            self.error(format!("unknown function '{}'", name), span);
            return CheckedExpression::Garbage;
        };
        let ty = signature.return_type;

        if !args.is_empty() {
            self.error(
                format!(
                    "function '{}' takes no arguments, but {} {} given",
                    name,
                    args.len(),
                    if args.len() == 1 { "was" } else { "were" }
                ),
                span,
            );
        }

        CheckedExpression::Call {
            name: name.to_string(),
            ty,
        }
    }

    fn check_print(
        &mut self,
        target: PrintTarget,
        name: &str,
        args: &[ParsedExpression],
        span: Span,
        scope: &Scope,
    ) -> CheckedExpression {
        let Some((format, rest)) = args.split_first() else {
            self.error(format!("'{}' expects a format string", name), span);
            return CheckedExpression::Garbage;
        };

        let checked_args: Vec<_> = rest
            .iter()
            .map(|arg| {
                let checked = self.check_expression(arg, scope);
                if checked.ty() == Type::Void {
                    self.error("cannot print a value of type void", arg.span());
                }
                checked
            })
            .collect();

        let ParsedExpression::QuotedString(format, format_span) = format else {
            self.error(
                format!("first argument to '{}' must be a string literal", name),
                format.span(),
            );
            return CheckedExpression::Garbage;
        };

        let pieces: Vec<String> = format.split("{}").map(str::to_string).collect();
        let placeholders = pieces.len() - 1;
        if placeholders != checked_args.len() {
            self.error(
                format!(
                    "format string expects {} argument{}, but {} {} given",
                    placeholders,
                    if placeholders == 1 { "" } else { "s" },
                    checked_args.len(),
                    if checked_args.len() == 1 { "was" } else { "were" }
                ),
                *format_span,
            );
            return CheckedExpression::Garbage;
        }

        CheckedExpression::Print {
            target,
            pieces,
            args: checked_args,
        }
    }
}

/// Variables visible in a function body, with their type and definition span.
type Scope = IndexMap<String, (Type, Span)>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::lex, parser::parse};

    fn check(source: &str) -> (CheckedProgram, Vec<Diagnostic>) {
        let file_id = FileId::new(0);
        let (tokens, lex_errors) = lex(file_id, source);
        let (parsed, parse_errors) = parse(&tokens);
        assert!(lex_errors.is_empty() && parse_errors.is_empty());
        typecheck(file_id, &parsed)
    }

    fn errors(source: &str) -> Vec<String> {
        check(source).1.into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn test_check_hello_world() {
        let (program, diagnostics) = check("function main() {\n    println(\"Hello, {}!\", \"world\")\n}");

        assert!(diagnostics.is_empty());
        let main = program.function("main").unwrap();
        assert_eq!(main.return_type, Type::Void);
        match &main.body[0] {
            CheckedStatement::Expression {
                expr: CheckedExpression::Print { target, pieces, args },
                ..
            } => {
                assert_eq!(*target, PrintTarget::Stdout);
                assert_eq!(pieces, &["Hello, ", "!"]);
                assert_eq!(args, &[CheckedExpression::QuotedString("world".into())]);
            }
            other => panic!("unexpected statement: {other:?}"),
        }
    }

    #[test]
    fn test_check_forward_call_and_let() {
        let (program, diagnostics) = check(
            "function main() -> i64 {\n    let x = answer()\n    return x\n}\nfunction answer() -> i64 {\n    return 42\n}",
        );

        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let main = program.function("main").unwrap();
        assert!(matches!(
            &main.body[0],
            CheckedStatement::Let { ty: Type::I64, init: CheckedExpression::Call { .. }, .. }
        ));
    }

    #[test]
    fn test_check_missing_main() {
        assert_eq!(errors("function helper() {}"), ["no 'main' function defined"]);
    }

    #[test]
    fn test_check_main_return_type() {
        assert_eq!(
            errors("function main() -> String {\n    return \"x\"\n}"),
            ["'main' must return void or i64"]
        );
    }

    #[test]
    fn test_check_unknown_type() {
        assert_eq!(
            errors("function main() -> float {}"),
            ["unknown type 'float'"]
        );
    }

    #[test]
    fn test_check_duplicate_function() {
        let (_, diagnostics) = check("function main() {}\nfunction main() {}");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "redefinition of function 'main'");
        let hint = diagnostics[0].hint.as_ref().unwrap();
        assert_eq!(hint.span.start, 9);
    }

    #[test]
    fn test_check_builtin_redefinition() {
        assert_eq!(
            errors("function println() {}\nfunction main() {}"),
            ["cannot redefine builtin function 'println'"]
        );
    }

    #[test]
    fn test_check_unknown_function_and_variable() {
        assert_eq!(
            errors("function main() {\n    missing()\n    println(\"{}\", y)\n}"),
            ["unknown function 'missing'", "unknown variable 'y'"]
        );
    }

    #[test]
    fn test_check_argument_count() {
        assert_eq!(
            errors("function f() {}\nfunction main() {\n    f(1)\n}"),
            ["function 'f' takes no arguments, but 1 was given"]
        );
    }

    #[test]
    fn test_check_format_placeholders() {
        assert_eq!(
            errors("function main() {\n    println(\"{} {}\", 1)\n}"),
            ["format string expects 2 arguments, but 1 was given"]
        );
    }

    #[test]
    fn test_check_format_must_be_literal() {
        assert_eq!(
            errors("function main() {\n    let s = \"x\"\n    eprintln(s)\n}"),
            ["first argument to 'eprintln' must be a string literal"]
        );
    }

    #[test]
    fn test_check_println_without_args() {
        assert_eq!(
            errors("function main() {\n    println()\n}"),
            ["'println' expects a format string"]
        );
    }

    #[test]
    fn test_check_void_binding_and_print() {
        assert_eq!(
            errors("function f() {}\nfunction main() {\n    let x = f()\n    println(\"{}\", f())\n}"),
            [
                "cannot bind a value of type void to 'x'",
                "cannot print a value of type void"
            ]
        );
    }

    #[test]
    fn test_check_variable_redefinition() {
        let (_, diagnostics) = check("function main() {\n    let a = 1\n    let a = 2\n}");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "redefinition of variable 'a'");
        assert!(diagnostics[0].hint.is_some());
    }

    #[test]
    fn test_check_return_mismatch() {
        assert_eq!(
            errors("function f() -> i64 {\n    return \"no\"\n}\nfunction main() {}"),
            ["return type mismatch: expected i64, found String"]
        );
        assert_eq!(
            errors("function main() {\n    return 1\n}"),
            ["return type mismatch: expected void, found i64"]
        );
    }

    #[test]
    fn test_check_missing_return() {
        assert_eq!(
            errors("function f() -> i64 {}\nfunction main() {}"),
            ["function 'f' must return a value of type i64"]
        );
    }

    #[test]
    fn test_check_errors_do_not_cascade() {
        // The unknown variable is reported once; the binding does not add more.
        assert_eq!(
            errors("function main() {\n    let a = b\n    println(\"{}\", a)\n}"),
            ["unknown variable 'b'"]
        );
    }
}
