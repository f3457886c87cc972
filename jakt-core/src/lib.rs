//! Core utilities and types for the Jakt compiler driver.
//!
//! This crate provides source addressing, path handling and file output
//! shared by the compiler library and the `jakt` binary.

mod file;
mod path;
mod span;

// File operations
pub use file::{File, write_file};
// Paths
pub use path::FilePath;
// Source addressing
pub use span::{FileId, Span};
