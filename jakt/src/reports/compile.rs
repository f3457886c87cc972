//! Compile report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};
use crate::ops::ToolchainError;

/// How a compilation ended.
#[derive(Debug)]
pub enum CompileReport {
    /// Diagnostics stopped the pipeline before code generation.
    Rejected { error_count: usize },

    /// Generated C++ destined for stdout.
    Emitted { source: String },

    /// Generated C++ was written and compiled.
    Built {
        source_path: PathBuf,
        binary_path: PathBuf,
        prettified: bool,
    },

    /// Generated C++ was written but an external tool failed.
    BuildFailed {
        source_path: PathBuf,
        error: ToolchainError,
    },

    /// The built binary ran to completion.
    Ran { binary_path: PathBuf, exit_code: i32 },
}

impl CompileReport {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Rejected { .. } | Self::BuildFailed { .. } => 1,
            Self::Emitted { .. } | Self::Built { .. } => 0,
            Self::Ran { exit_code, .. } => *exit_code,
        }
    }
}

impl Report for CompileReport {
    fn render(&self, out: &mut dyn Output) {
        match self {
            // The diagnostics themselves were printed at the gate.
            Self::Rejected { error_count } => {
                tracing::debug!(error_count, "compilation rejected");
            }
            Self::Emitted { source } => out.source(source),
            Self::Built {
                source_path,
                binary_path,
                prettified,
            } => {
                tracing::debug!(
                    source = %source_path.display(),
                    binary = %binary_path.display(),
                    prettified,
                    "build finished"
                );
            }
            Self::BuildFailed { source_path, error } => {
                out.diagnostic(error);
                out.status(&format!(
                    "note: generated source kept at {}",
                    source_path.display()
                ));
            }
            Self::Ran {
                binary_path,
                exit_code,
            } => {
                tracing::debug!(binary = %binary_path.display(), exit_code, "program exited");
            }
        }
    }
}
