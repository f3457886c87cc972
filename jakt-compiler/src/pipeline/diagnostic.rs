//! Diagnostic types for the compilation pipeline.
//!
//! Phases record diagnostics in the [`CompilationContext`](super::CompilationContext)
//! instead of failing; the pipeline checks them once, after typechecking.

use jakt_core::Span;
use miette::SourceSpan;

/// A secondary note pointing at a related location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub message: String,
    pub span: Span,
}

/// A compilation problem reported by a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The phase that produced this diagnostic.
    pub phase: String,
    /// The diagnostic message.
    pub message: String,
    /// Where in the source the problem was found.
    pub span: Span,
    /// Optional pointer to a related location.
    pub hint: Option<Hint>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(phase: impl Into<String>, message: impl Into<String>, span: Span) -> Self {
        Self {
            phase: phase.into(),
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Attach a hint pointing at a related location.
    pub fn with_hint(mut self, message: impl Into<String>, span: Span) -> Self {
        self.hint = Some(Hint {
            message: message.into(),
            span,
        });
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint.message)?;
        }
        Ok(())
    }
}

pub(crate) fn source_span(span: Span) -> SourceSpan {
    (span.start, span.len()).into()
}
