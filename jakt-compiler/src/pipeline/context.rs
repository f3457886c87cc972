//! Compilation context passed through pipeline phases.

use std::path::Path;

use eyre::{Result, eyre};
use indexmap::IndexMap;
use jakt_core::{FileId, FilePath};
use miette::NamedSource;

use super::diagnostic::{Diagnostic, source_span};
use crate::error::{self, Error};

/// A source file registered with the context.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: FilePath,
    contents: String,
}

impl SourceFile {
    pub fn path(&self) -> &FilePath {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// One-based line number containing the byte `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        let end = offset.min(self.contents.len());
        self.contents.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }
}

/// Toggles for verbose phase output. None of them affect compilation results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugFlags {
    /// Render the token stream after lexing.
    pub lexer: bool,
    /// Render the parsed tree after parsing.
    pub parser: bool,
    /// Render the checked program after typechecking.
    pub typechecker: bool,
    /// Print a summary line after every phase.
    pub debug_print: bool,
}

/// State shared by every phase of a compilation run.
///
/// Phases may register files and append diagnostics; they cannot remove or
/// reorder what earlier phases recorded.
#[derive(Debug, Default)]
pub struct CompilationContext {
    files: Vec<SourceFile>,
    file_ids: IndexMap<FilePath, FileId>,
    errors: Vec<Diagnostic>,
    current_file: Option<FileId>,
    debug: DebugFlags,
}

impl CompilationContext {
    /// Create an empty context with no files and no current file.
    pub fn new(debug: DebugFlags) -> Self {
        Self {
            debug,
            ..Self::default()
        }
    }

    pub fn debug(&self) -> DebugFlags {
        self.debug
    }

    /// Register a source file, reading its contents on first sight.
    ///
    /// Registering a path that normalizes to an already known file returns
    /// the existing id without touching the filesystem again.
    pub fn register(&mut self, path: impl AsRef<Path>) -> error::Result<FileId> {
        let path = FilePath::new(path);
        if let Some(&id) = self.file_ids.get(&path) {
            return Ok(id);
        }

        let contents =
            std::fs::read_to_string(path.path()).map_err(|e| Error::io(path.path(), e))?;

        let id = FileId::new(self.files.len());
        tracing::debug!(file = %path, %id, bytes = contents.len(), "registered source file");
        self.files.push(SourceFile {
            path: path.clone(),
            contents,
        });
        self.file_ids.insert(path, id);
        Ok(id)
    }

    /// Name the file subsequent phases attribute their diagnostics to.
    pub fn set_current_file(&mut self, id: FileId) {
        self.current_file = Some(id);
    }

    /// The file phases are working on.
    ///
    /// # Errors
    ///
    /// Fails if no current file was set or it does not name a registered file.
    pub fn current_file(&self) -> Result<FileId> {
        let id = self
            .current_file
            .ok_or_else(|| eyre!("no current file set - register a file before running phases"))?;
        if id.index() >= self.files.len() {
            return Err(eyre!("current file {} is not registered", id));
        }
        Ok(id)
    }

    /// The source of the current file.
    pub fn current_source(&self) -> Result<&SourceFile> {
        let id = self.current_file()?;
        Ok(&self.files[id.index()])
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// Look up the id of an already registered path.
    pub fn file_id(&self, path: impl AsRef<Path>) -> Option<FileId> {
        self.file_ids.get(&FilePath::new(path)).copied()
    }

    /// Append a diagnostic.
    pub fn record_error(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(phase = %diagnostic.phase, message = %diagnostic.message, "recorded error");
        self.errors.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Recorded diagnostics in detection order.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter()
    }

    /// Render every diagnostic against the contents of its file.
    pub fn source_errors(&self) -> impl Iterator<Item = Error> + '_ {
        self.errors.iter().map(|diag| self.source_error(diag))
    }

    /// Print every diagnostic to stderr, in detection order.
    pub fn print_errors(&self) {
        for error in self.source_errors() {
            eprintln!("{:?}", miette::Report::new(error));
        }
    }

    fn source_error(&self, diag: &Diagnostic) -> Error {
        let Some(file) = self.file(diag.span.file_id) else {
            return Error::Detached {
                message: diag.message.clone(),
            };
        };

        let (hint_span, hint) = match &diag.hint {
            Some(hint) => (Some(source_span(hint.span)), hint.message.clone()),
            None => (None, String::new()),
        };

        Error::Compile {
            src: NamedSource::new(file.path.to_string(), file.contents.clone()),
            span: source_span(diag.span),
            hint_span,
            phase: diag.phase.clone(),
            message: diag.message.clone(),
            hint,
        }
    }
}
