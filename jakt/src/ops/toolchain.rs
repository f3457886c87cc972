//! External tool invocation: the C++ compiler, clang-format and the built binary.

use std::{
    ffi::{OsStr, OsString},
    path::Path,
    process::{Command, ExitStatus},
};

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ToolPaths;

/// Warnings the generated C++ triggers by construction.
const SUPPRESSED_WARNINGS: &[&str] = &[
    "-Wno-unknown-warning-option",
    "-Wno-trigraphs",
    "-Wno-parentheses-equality",
    "-Wno-unqualified-std-cast-call",
    "-Wno-user-defined-literals",
    "-Wno-deprecated-declarations",
];

/// An external tool could not be launched or exited unsuccessfully.
#[derive(Debug, Error, Diagnostic)]
pub enum ToolchainError {
    #[error("failed to launch {tool}: `{command}`")]
    #[diagnostic(
        code(jakt::toolchain),
        help("check that {tool} is installed, or pass its path with {flag}")
    )]
    Spawn {
        tool: &'static str,
        command: String,
        flag: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run compiled program `{command}`")]
    #[diagnostic(code(jakt::toolchain))]
    Run {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: `{command}`")]
    #[diagnostic(code(jakt::toolchain))]
    Failed {
        tool: &'static str,
        command: String,
        status: ExitStatus,
    },
}

/// Command line compiling `source` into `binary` against the runtime headers.
pub fn compiler_command(compiler: &Path, runtime: &Path, binary: &Path, source: &Path) -> Command {
    let mut cmd = Command::new(compiler);
    cmd.arg("-fcolor-diagnostics")
        .arg("-std=c++20")
        .args(SUPPRESSED_WARNINGS)
        .arg("-I")
        .arg(runtime)
        .arg("-o")
        .arg(binary)
        .arg(source);
    cmd
}

/// Command line formatting `source` in place.
pub fn formatter_command(formatter: &Path, style: Option<&Path>, source: &Path) -> Command {
    let mut cmd = Command::new(formatter);
    cmd.arg("-i").arg(source);
    if let Some(style) = style {
        let mut flag = OsString::from("--style=file:");
        flag.push(style);
        cmd.arg(flag);
    }
    cmd
}

/// Compile the generated C++ with the configured compiler.
pub fn compile_cpp(tools: &ToolPaths, source: &Path, binary: &Path) -> Result<(), ToolchainError> {
    let mut cmd = compiler_command(&tools.cxx_compiler, &tools.runtime, binary, source);
    run_checked(&mut cmd, "C++ compiler", "--cxx-compiler-path")
}

/// Format the generated C++ in place with clang-format.
pub fn format_cpp(tools: &ToolPaths, source: &Path) -> Result<(), ToolchainError> {
    let mut cmd = formatter_command(
        &tools.clang_format,
        tools.dot_clang_format.as_deref(),
        source,
    );
    run_checked(&mut cmd, "clang-format", "--clang-format-path")
}

/// Execute the built binary and return its exit code.
///
/// A binary killed by a signal has no exit code and is reported as 1.
pub fn run_binary(binary: &Path) -> Result<i32, ToolchainError> {
    let path = std::path::absolute(binary).unwrap_or_else(|_| binary.to_path_buf());
    let command = path.display().to_string();
    tracing::debug!(command = %command, "running compiled program");

    let status = Command::new(&path)
        .status()
        .map_err(|source| ToolchainError::Run { command, source })?;

    tracing::debug!(%status, "compiled program finished");
    Ok(status.code().unwrap_or(1))
}

/// Run `cmd` to completion, turning a non-zero exit into an error.
pub fn run_checked(
    cmd: &mut Command,
    tool: &'static str,
    flag: &'static str,
) -> Result<(), ToolchainError> {
    let status = spawn(cmd, tool, flag)?;
    if status.success() {
        Ok(())
    } else {
        Err(ToolchainError::Failed {
            tool,
            command: command_line(cmd),
            status,
        })
    }
}

fn spawn(
    cmd: &mut Command,
    tool: &'static str,
    flag: &'static str,
) -> Result<ExitStatus, ToolchainError> {
    let command = command_line(cmd);
    tracing::debug!(tool, command = %command, "running external command");

    let status = cmd.status().map_err(|source| ToolchainError::Spawn {
        tool,
        command: command.clone(),
        flag,
        source,
    })?;

    tracing::debug!(tool, %status, "external command finished");
    Ok(status)
}

/// Human-readable rendering of a command line.
fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(OsStr::to_string_lossy)
        .collect::<Vec<_>>()
        .join(" ")
}
