use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for compiler operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Errors surfaced to the user with source context.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{}'", path.display())]
    #[diagnostic(code(jakt::io), help("check that the file exists and is readable UTF-8"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(jakt::compile_error))]
    Compile {
        #[source_code]
        src: NamedSource<String>,
        #[label("{phase} error")]
        span: SourceSpan,
        #[label("{hint}")]
        hint_span: Option<SourceSpan>,
        phase: String,
        message: String,
        hint: String,
    },

    /// A diagnostic whose file is not registered with the context.
    #[error("{message}")]
    #[diagnostic(code(jakt::compile_error))]
    Detached { message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
