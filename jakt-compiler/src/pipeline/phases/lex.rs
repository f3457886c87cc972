//! Lex phase - tokenizes the current file.

use eyre::Result;

use crate::{
    lexer::{self, Token},
    pipeline::{CompilationContext, Phase},
};

pub struct LexPhase;

impl Phase for LexPhase {
    type Input = ();
    type Output = Vec<Token>;

    fn name(&self) -> &'static str {
        "lex"
    }

    fn run(&self, ctx: &mut CompilationContext, _input: ()) -> Result<Vec<Token>> {
        let file_id = ctx.current_file()?;
        let (tokens, diagnostics) = lexer::lex(file_id, ctx.current_source()?.contents());
        for diagnostic in diagnostics {
            ctx.record_error(diagnostic);
        }
        Ok(tokens)
    }

    fn render(&self, tokens: &Vec<Token>) -> String {
        tokens
            .iter()
            .map(|token| format!("token: {}", token))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
