//! Typecheck phase - resolves names and types.

use eyre::Result;

use crate::{
    parser::ParsedFile,
    pipeline::{CompilationContext, Phase},
    typechecker::{self, CheckedProgram},
};

pub struct TypecheckPhase;

impl Phase for TypecheckPhase {
    type Input = ParsedFile;
    type Output = CheckedProgram;

    fn name(&self) -> &'static str {
        "typecheck"
    }

    fn run(&self, ctx: &mut CompilationContext, parsed: ParsedFile) -> Result<CheckedProgram> {
        let file_id = ctx.current_file()?;
        let (program, diagnostics) = typechecker::typecheck(file_id, &parsed);
        for diagnostic in diagnostics {
            ctx.record_error(diagnostic);
        }
        Ok(program)
    }
}
