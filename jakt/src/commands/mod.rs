mod compile;

use std::ffi::OsString;

use clap::{CommandFactory, Parser, error::ErrorKind};
use compile::CompileCommand;
use eyre::Result;

use crate::config::{Configuration, UsageError};

/// Extension trait for exiting on compiler errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for jakt_compiler::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "jakt")]
#[command(version, disable_version_flag = true)]
#[command(override_usage = "jakt [OPTIONS] <FILE>")]
#[command(about = "Compile Jakt source files to C++ and native executables")]
pub(crate) struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    #[command(flatten)]
    compile: CompileCommand,
}

/// What the command line asked for.
#[derive(Debug)]
pub(crate) enum Invocation {
    Compile(Box<Configuration>),
    Help(String),
    Version(String),
}

/// Resolve the full argument list, program name included.
pub(crate) fn resolve<I, T>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() < 2 {
        return Err(UsageError::NoArguments);
    }

    match Cli::try_parse_from(args) {
        Ok(cli) => cli
            .compile
            .into_configuration()
            .map(|config| Invocation::Compile(Box::new(config))),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp => Ok(Invocation::Help(err.to_string())),
            ErrorKind::DisplayVersion => Ok(Invocation::Version(err.to_string())),
            _ => Err(UsageError::Invalid(with_usage(err.to_string()))),
        },
    }
}

/// Append usage text to a rendered parser error that lacks it.
fn with_usage(mut rendered: String) -> String {
    if !rendered.contains("Usage:") {
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        rendered.push('\n');
        rendered.push_str(&usage());
        rendered.push('\n');
    }
    rendered
}

/// One-line usage text.
pub(crate) fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Entry point: resolve `args`, then compile.
pub(crate) fn run<I: IntoIterator<Item = OsString>>(args: I) -> Result<()> {
    let config = match resolve(args) {
        Ok(Invocation::Compile(config)) => config,
        Ok(Invocation::Help(text) | Invocation::Version(text)) => {
            print!("{}", text);
            return Ok(());
        }
        Err(err) => {
            report_usage_error(&err);
            std::process::exit(1);
        }
    };

    tracing::debug!(input = %config.input, mode = ?config.mode(), "resolved configuration");
    compile::execute(&config)
}

fn report_usage_error(err: &UsageError) {
    match err {
        UsageError::Invalid(rendered) => eprint!("{}", rendered),
        UsageError::NoArguments => eprintln!("{}", usage()),
        other => {
            eprintln!("error: {}", other);
            eprintln!();
            eprintln!("{}", usage());
        }
    }
}
