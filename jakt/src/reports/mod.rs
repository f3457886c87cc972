//! Report data structures for the driver.
//!
//! Operations build reports, then render them to an Output target.

mod compile;
mod output;

pub use compile::CompileReport;
pub use output::{Report, TerminalOutput};
