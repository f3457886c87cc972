//! Resolved driver configuration.

use std::path::{Path, PathBuf};

use jakt_compiler::DebugFlags;
use jakt_core::FilePath;
use thiserror::Error;

/// Extension every input file must carry.
pub const SOURCE_EXTENSION: &str = "jakt";

pub const DEFAULT_CLANG_FORMAT: &str = "clang-format";
pub const DEFAULT_CXX_COMPILER: &str = "clang++";
pub const DEFAULT_RUNTIME_PATH: &str = "runtime";
pub const DEFAULT_BINARY_DIR: &str = "build";

/// A problem with the command line. Reported with usage text, exit status 1.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("no arguments given")]
    NoArguments,

    #[error("you must pass a source file")]
    MissingInput,

    #[error("you may pass only one source file")]
    TooManyInputs,

    #[error("the compiler expects files with file extension .{SOURCE_EXTENSION}")]
    WrongExtension { path: PathBuf },

    /// Rendered argument parser error, which already carries usage text.
    #[error("{0}")]
    Invalid(String),
}

/// Paths of the external tools and directories the driver uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub cxx_compiler: PathBuf,
    pub clang_format: PathBuf,
    /// `.clang-format` style file passed to the formatter, if any.
    pub dot_clang_format: Option<PathBuf>,
    pub runtime: PathBuf,
    pub binary_dir: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            cxx_compiler: DEFAULT_CXX_COMPILER.into(),
            clang_format: DEFAULT_CLANG_FORMAT.into(),
            dot_clang_format: None,
            runtime: DEFAULT_RUNTIME_PATH.into(),
            binary_dir: DEFAULT_BINARY_DIR.into(),
        }
    }
}

/// What the driver does with the generated C++.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print it to stdout.
    Emit,
    /// Write it to the binary directory and compile it.
    Build,
    /// Build, then execute the produced binary.
    BuildAndRun,
}

/// Everything the driver needs, derived once from the command line.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub input: FilePath,
    pub debug: DebugFlags,
    /// Embed `#line` information in the generated C++.
    pub emit_debug_info: bool,
    pub build: bool,
    pub run: bool,
    pub prettify: bool,
    pub tools: ToolPaths,
}

impl Configuration {
    /// Configuration for `input` with every option at its default.
    pub fn new(input: impl AsRef<Path>) -> Result<Self, UsageError> {
        let input = FilePath::new(input);
        if input.extension() != Some(SOURCE_EXTENSION) {
            return Err(UsageError::WrongExtension {
                path: input.path().to_path_buf(),
            });
        }
        Ok(Self {
            input,
            debug: DebugFlags::default(),
            emit_debug_info: false,
            build: false,
            run: false,
            prettify: false,
            tools: ToolPaths::default(),
        })
    }

    pub fn mode(&self) -> Mode {
        match (self.build, self.run) {
            (_, true) => Mode::BuildAndRun,
            (true, false) => Mode::Build,
            (false, false) => Mode::Emit,
        }
    }

    /// Input basename without its extension.
    pub fn output_name(&self) -> &str {
        self.input.stem()
    }

    /// Where the generated C++ is written in build mode.
    pub fn cpp_path(&self) -> PathBuf {
        self.tools
            .binary_dir
            .join(format!("{}.cpp", self.output_name()))
    }

    /// Where the native compiler puts the executable.
    pub fn binary_path(&self) -> PathBuf {
        self.tools.binary_dir.join(self.output_name())
    }
}
