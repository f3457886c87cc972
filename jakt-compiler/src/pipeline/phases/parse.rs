//! Parse phase - builds the parsed tree from tokens.

use eyre::Result;

use crate::{
    lexer::Token,
    parser::{self, ParsedFile},
    pipeline::{CompilationContext, Phase},
};

pub struct ParsePhase;

impl Phase for ParsePhase {
    type Input = Vec<Token>;
    type Output = ParsedFile;

    fn name(&self) -> &'static str {
        "parse"
    }

    fn run(&self, ctx: &mut CompilationContext, tokens: Vec<Token>) -> Result<ParsedFile> {
        let (parsed, diagnostics) = parser::parse(&tokens);
        for diagnostic in diagnostics {
            ctx.record_error(diagnostic);
        }
        Ok(parsed)
    }
}
