//! Code builder utility for generating properly indented C++.

/// Mutable builder for line-oriented code with indentation tracking.
///
/// # Example
///
/// ```
/// use jakt_compiler::codegen::CodeBuilder;
///
/// let mut builder = CodeBuilder::new();
/// builder
///     .push_line("int main() {")
///     .push_indent()
///     .push_line("return 0;")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "int main() {\n    return 0;\n}\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    const INDENT: &'static str = "    ";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add `header`, the lines written by `f` one level deeper, then `close`.
    pub fn push_block(&mut self, header: &str, close: &str, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.push_line(header).push_indent();
        f(self);
        self.push_dedent().push_line(close)
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(Self::INDENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_block_indents_body() {
        let mut builder = CodeBuilder::new();
        builder.push_block("namespace Jakt {", "}", |b| {
            b.push_block("void f() {", "}", |b| {
                b.push_line("return;");
            });
        });

        assert_eq!(
            builder.build(),
            "namespace Jakt {\n    void f() {\n        return;\n    }\n}\n"
        );
    }

    #[test]
    fn test_blank_lines_are_not_indented() {
        let mut builder = CodeBuilder::new();
        builder.push_indent().push_blank().push_line("x;");
        assert_eq!(builder.build(), "\n    x;\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::new();
        builder.push_dedent().push_line("x;");
        assert_eq!(builder.build(), "x;\n");
    }
}
