//! Compilation pipeline and bootstrap frontend for the Jakt compiler driver.
//!
//! The [`pipeline`] module holds the shared [`CompilationContext`], the
//! [`Phase`] contract and the [`Pipeline`] runner. The `lexer`, `parser`,
//! `typechecker` and `codegen` modules implement the built-in phases.

pub mod codegen;
mod error;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod typechecker;

pub use error::{Error, Result};
pub use pipeline::{
    CompilationContext, DebugFlags, Diagnostic, Phase, Pipeline, PipelineOutcome, Plugin,
};
