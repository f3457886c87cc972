//! Built-in pipeline phases.
//!
//! Each phase is a thin adapter between the [`Phase`](super::Phase) contract
//! and the bootstrap frontend:
//!
//! - [`LexPhase`] - tokenizes the current file
//! - [`ParsePhase`] - builds the parsed tree
//! - [`TypecheckPhase`] - produces the checked program
//! - [`GeneratePhase`] - renders C++ source text

mod generate;
mod lex;
mod parse;
mod typecheck;

pub use generate::GeneratePhase;
pub use lex::LexPhase;
pub use parse::ParsePhase;
pub use typecheck::TypecheckPhase;
