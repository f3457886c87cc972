//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    /// Write generated source text exactly as given.
    fn source(&mut self, text: &str);

    /// Render a status line.
    fn status(&mut self, text: &str);

    /// Render an error diagnostic.
    fn diagnostic(&mut self, diagnostic: &dyn miette::Diagnostic);
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Terminal output implementation.
///
/// Generated source goes to stdout, everything else to stderr so emitted
/// C++ can be piped straight into a file.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn source(&mut self, text: &str) {
        print!("{}", text);
    }

    fn status(&mut self, text: &str) {
        eprintln!("{}", text);
    }

    fn diagnostic(&mut self, diagnostic: &dyn miette::Diagnostic) {
        let mut rendered = String::new();
        match miette::GraphicalReportHandler::new().render_report(&mut rendered, diagnostic) {
            Ok(()) => eprint!("{}", rendered),
            Err(_) => eprintln!("error: {}", diagnostic),
        }
    }
}
