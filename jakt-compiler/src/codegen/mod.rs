//! C++ code generation for checked programs.
//!
//! User functions live in `namespace Jakt`; a global `main` forwards to
//! `Jakt::main` and turns an `i64` result into the process exit code.

mod builder;

pub use builder::CodeBuilder;

use crate::{
    pipeline::CompilationContext,
    typechecker::{
        CheckedExpression, CheckedFunction, CheckedProgram, CheckedStatement, PrintTarget, Type,
    },
};

/// Generate C++ source for `program`.
///
/// With `debug_info` set, every statement is preceded by a `#line`
/// directive pointing back at the Jakt source.
pub fn generate(ctx: &CompilationContext, program: &CheckedProgram, debug_info: bool) -> String {
    let generator = Generator { ctx, debug_info };
    let mut builder = CodeBuilder::new();
    generator.emit_program(&mut builder, program);
    builder.build()
}

struct Generator<'a> {
    ctx: &'a CompilationContext,
    debug_info: bool,
}

impl Generator<'_> {
    fn emit_program(&self, b: &mut CodeBuilder, program: &CheckedProgram) {
        b.push_line("// Generated by the Jakt compiler. Do not edit.")
            .push_line("#include <cstdint>")
            .push_line("#include <iostream>")
            .push_line("#include <string>")
            .push_blank();

        b.push_block("namespace Jakt {", "} // namespace Jakt", |b| {
            for function in &program.functions {
                b.push_line(&format!("{};", signature(function)));
            }
            for function in &program.functions {
                b.push_blank();
                b.push_block(&format!("{} {{", signature(function)), "}", |b| {
                    for statement in &function.body {
                        self.emit_statement(b, statement);
                    }
                });
            }
        });

        if let Some(main) = program.function("main") {
            b.push_blank();
            b.push_block("int main() {", "}", |b| {
                if main.return_type == Type::I64 {
                    b.push_line("return static_cast<int>(Jakt::main());");
                } else {
                    b.push_line("Jakt::main();").push_line("return 0;");
                }
            });
        }
    }

    fn emit_statement(&self, b: &mut CodeBuilder, statement: &CheckedStatement) {
        if self.debug_info {
            let span = statement.span();
            if let Some(file) = self.ctx.file(span.file_id) {
                b.push_line(&format!(
                    "#line {} \"{}\"",
                    file.line_of(span.start),
                    escape(&file.path().to_string())
                ));
            }
        }

        let line = match statement {
            CheckedStatement::Let { name, ty, init, .. } => {
                format!("{} {} = {};", cpp_type(*ty), name, expression(init))
            }
            CheckedStatement::Return { value: None, .. } => "return;".to_string(),
            CheckedStatement::Return {
                value: Some(value), ..
            } => format!("return {};", expression(value)),
            CheckedStatement::Expression { expr, .. } => format!("{};", expression(expr)),
        };
        b.push_line(&line);
    }
}

fn signature(function: &CheckedFunction) -> String {
    format!("{} {}()", cpp_type(function.return_type), function.name)
}

fn cpp_type(ty: Type) -> &'static str {
    match ty {
        Type::Void => "void",
        Type::I64 => "std::int64_t",
        Type::String => "std::string",
        Type::Unknown => "auto",
    }
}

fn expression(expr: &CheckedExpression) -> String {
    match expr {
        CheckedExpression::Number(value) => value.to_string(),
        CheckedExpression::QuotedString(value) => format!("std::string(\"{}\")", escape(value)),
        CheckedExpression::Var { name, .. } => name.clone(),
        CheckedExpression::Call { name, .. } => format!("{}()", name),
        CheckedExpression::Print {
            target,
            pieces,
            args,
        } => {
            let mut out = match target {
                PrintTarget::Stdout => "std::cout",
                PrintTarget::Stderr => "std::cerr",
            }
            .to_string();
            for (index, piece) in pieces.iter().enumerate() {
                if !piece.is_empty() {
                    out.push_str(&format!(" << \"{}\"", escape(piece)));
                }
                if let Some(arg) = args.get(index) {
                    out.push_str(&format!(" << {}", expression(arg)));
                }
            }
            out.push_str(" << std::endl");
            out
        }
        CheckedExpression::Garbage => "/* invalid expression */".to_string(),
    }
}

/// Escape text for use inside a C++ string literal.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            // Three octal digits so a following digit is never absorbed.
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
