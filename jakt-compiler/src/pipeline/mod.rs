//! Compilation pipeline for the Jakt driver.
//!
//! This module provides a [`Pipeline`] orchestrator that runs the compilation
//! phases over the current file of a [`CompilationContext`]:
//!
//! - Explicit phase boundaries (lex → parse → typecheck → generate)
//! - A single diagnostics check between typecheck and generate
//! - Plugin hooks for extensibility (before/after each phase)
//!
//! # Example
//!
//! ```ignore
//! use jakt_compiler::pipeline::{CompilationContext, DebugFlags, Pipeline, PipelineOutcome};
//!
//! let mut ctx = CompilationContext::new(DebugFlags::default());
//! let id = ctx.register("hello.jakt")?;
//! ctx.set_current_file(id);
//!
//! let outcome = Pipeline::new(false).run(&mut ctx)?;
//! ctx.print_errors();
//! if let PipelineOutcome::Generated(cpp) = outcome {
//!     print!("{cpp}");
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod summary;

pub use context::{CompilationContext, DebugFlags, SourceFile};
pub use diagnostic::{Diagnostic, Hint};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::{Pipeline, PipelineOutcome};
pub use summary::PhaseSummaryPlugin;
