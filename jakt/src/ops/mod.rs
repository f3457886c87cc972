//! Core operations.
//!
//! This module contains the business logic of the driver,
//! separated from argument parsing and output rendering.

pub mod compile;
pub mod toolchain;

pub use compile::compile;
pub use toolchain::ToolchainError;
