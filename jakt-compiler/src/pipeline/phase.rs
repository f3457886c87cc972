//! Pipeline phase trait.

use std::fmt;

use eyre::Result;

use super::CompilationContext;

/// A phase in the compilation pipeline.
///
/// Each phase consumes the artifact produced by the previous one and
/// returns the next. Problems in the source are recorded as diagnostics in
/// the context; returning `Err` is reserved for fatal conditions.
///
/// Built-in phases:
/// - `LexPhase` - source text to tokens
/// - `ParsePhase` - tokens to a parsed tree
/// - `TypecheckPhase` - parsed tree to a checked program
/// - `GeneratePhase` - checked program to C++ source text
pub trait Phase {
    /// Artifact consumed by this phase.
    type Input;
    /// Artifact produced by this phase.
    type Output: fmt::Debug;

    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// Run this phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext, input: Self::Input) -> Result<Self::Output>;

    /// Render the phase output for debugging.
    fn render(&self, output: &Self::Output) -> String {
        format!("{output:#?}")
    }
}
