use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use jakt_compiler::{CompilationContext, DebugFlags};

use super::UnwrapOrExit;
use crate::{
    config::{
        Configuration, DEFAULT_BINARY_DIR, DEFAULT_CLANG_FORMAT, DEFAULT_CXX_COMPILER,
        DEFAULT_RUNTIME_PATH, ToolPaths, UsageError,
    },
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args, Debug)]
pub struct CompileCommand {
    /// Source file to compile (exactly one, with a .jakt extension)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Print the token stream
    #[arg(short = 'l')]
    pub debug_lexer: bool,

    /// Print the parsed syntax tree
    #[arg(short = 'p')]
    pub debug_parser: bool,

    /// Print the checked program
    #[arg(short = 't')]
    pub debug_typechecker: bool,

    /// Compile the generated C++ into an executable
    #[arg(short = 'b')]
    pub build: bool,

    /// Build, then run the executable
    #[arg(short = 'r')]
    pub run: bool,

    /// Emit #line directives pointing back at the Jakt source
    #[arg(short = 'd')]
    pub debug_info: bool,

    /// Print a summary after every compiler phase
    #[arg(long)]
    pub debug_print: bool,

    /// Run clang-format on the generated C++
    #[arg(long)]
    pub prettify_cpp_source: bool,

    /// Path to clang-format
    #[arg(short = 'F', long, value_name = "PATH", default_value = DEFAULT_CLANG_FORMAT)]
    pub clang_format_path: PathBuf,

    /// Path to a .clang-format style file
    #[arg(short = 'D', long, value_name = "PATH")]
    pub dot_clang_format_path: Option<PathBuf>,

    /// Path to the Jakt runtime headers
    #[arg(short = 'R', long, value_name = "PATH", default_value = DEFAULT_RUNTIME_PATH)]
    pub runtime_path: PathBuf,

    /// Output directory for generated C++ and executables
    #[arg(short = 'o', long, value_name = "PATH", default_value = DEFAULT_BINARY_DIR)]
    pub binary_dir: PathBuf,

    /// Path to the C++ compiler
    #[arg(short = 'C', long, value_name = "PATH", default_value = DEFAULT_CXX_COMPILER)]
    pub cxx_compiler_path: PathBuf,
}

impl CompileCommand {
    /// Validate the positional arguments and collect every option.
    pub fn into_configuration(self) -> Result<Configuration, UsageError> {
        let input = match self.files.as_slice() {
            [] => return Err(UsageError::MissingInput),
            [input] => input,
            _ => return Err(UsageError::TooManyInputs),
        };

        let mut config = Configuration::new(input)?;
        config.debug = DebugFlags {
            lexer: self.debug_lexer,
            parser: self.debug_parser,
            typechecker: self.debug_typechecker,
            debug_print: self.debug_print,
        };
        config.emit_debug_info = self.debug_info;
        config.build = self.build || self.run;
        config.run = self.run;
        config.prettify = self.prettify_cpp_source;
        config.tools = ToolPaths {
            cxx_compiler: self.cxx_compiler_path,
            clang_format: self.clang_format_path,
            dot_clang_format: self.dot_clang_format_path,
            runtime: self.runtime_path,
            binary_dir: self.binary_dir,
        };
        Ok(config)
    }
}

/// Compile the configured input and exit with the resulting status.
pub fn execute(config: &Configuration) -> Result<()> {
    let mut ctx = CompilationContext::new(config.debug);
    let file_id = ctx.register(config.input.path()).unwrap_or_exit();
    ctx.set_current_file(file_id);

    let report = ops::compile(&mut ctx, config)?;
    report.render(&mut TerminalOutput::new());

    match report.exit_code() {
        0 => Ok(()),
        code => std::process::exit(code),
    }
}
