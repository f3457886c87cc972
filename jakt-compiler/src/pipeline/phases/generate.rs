//! Generate phase - renders C++ source from the checked program.

use eyre::Result;

use crate::{
    codegen,
    pipeline::{CompilationContext, Phase},
    typechecker::CheckedProgram,
};

/// Phase that renders the checked program as C++.
///
/// Only runs once the context is free of diagnostics, so it never records
/// any itself.
pub struct GeneratePhase {
    debug_info: bool,
}

impl GeneratePhase {
    pub fn new(debug_info: bool) -> Self {
        Self { debug_info }
    }
}

impl Phase for GeneratePhase {
    type Input = CheckedProgram;
    type Output = String;

    fn name(&self) -> &'static str {
        "generate"
    }

    fn run(&self, ctx: &mut CompilationContext, program: CheckedProgram) -> Result<String> {
        Ok(codegen::generate(ctx, &program, self.debug_info))
    }

    fn render(&self, output: &String) -> String {
        output.clone()
    }
}
