//! Compile operation: run the pipeline, then emit, build or run.

use eyre::{Context, Result};
use jakt_compiler::{
    CompilationContext, Pipeline, PipelineOutcome, pipeline::PhaseSummaryPlugin,
};
use jakt_core::File;

use super::toolchain;
use crate::{
    config::{Configuration, Mode},
    reports::CompileReport,
};

/// Execute the compile operation on the current file of `ctx`.
///
/// Diagnostics are printed once every frontend phase has run. Any of them
/// rejects the compilation; otherwise the generated C++ is handled as
/// `config` asks.
///
/// # Errors
///
/// Returns an error if the pipeline fails fatally or the generated source
/// cannot be written.
pub fn compile(ctx: &mut CompilationContext, config: &Configuration) -> Result<CompileReport> {
    let mut pipeline = Pipeline::new(config.emit_debug_info);
    if config.debug.debug_print {
        pipeline = pipeline.plugin(PhaseSummaryPlugin::new());
    }

    let outcome = pipeline.run(ctx).wrap_err("Pipeline failed")?;
    ctx.print_errors();

    let source = match outcome {
        PipelineOutcome::Generated(source) => source,
        PipelineOutcome::Rejected { error_count } => {
            return Ok(CompileReport::Rejected { error_count });
        }
    };

    let mode = config.mode();
    tracing::info!(?mode, "code generated");
    match mode {
        Mode::Emit => Ok(CompileReport::Emitted { source }),
        Mode::Build | Mode::BuildAndRun => build(config, source, mode == Mode::BuildAndRun),
    }
}

fn build(config: &Configuration, source: String, run: bool) -> Result<CompileReport> {
    let file = File::new(config.cpp_path(), source);
    file.write().wrap_err("Failed to write generated source")?;

    let source_path = file.path().to_path_buf();
    let binary_path = config.binary_path();

    let mut result = toolchain::compile_cpp(&config.tools, &source_path, &binary_path);
    if result.is_ok() && config.prettify {
        result = toolchain::format_cpp(&config.tools, &source_path);
    }
    if let Err(error) = result {
        return Ok(CompileReport::BuildFailed { source_path, error });
    }

    if !run {
        return Ok(CompileReport::Built {
            source_path,
            binary_path,
            prettified: config.prettify,
        });
    }

    match toolchain::run_binary(&binary_path) {
        Ok(exit_code) => Ok(CompileReport::Ran {
            binary_path,
            exit_code,
        }),
        Err(error) => Ok(CompileReport::BuildFailed { source_path, error }),
    }
}
