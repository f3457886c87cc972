//! Per-phase summary plugin backing `--debug-print`.

use std::cell::RefCell;

use eyre::Result;

use super::{CompilationContext, Plugin};

/// A plugin that reports how many errors exist after each phase.
///
/// Lines are kept for inspection and, unless created with
/// [`PhaseSummaryPlugin::quiet`], echoed to stderr as they are produced.
pub struct PhaseSummaryPlugin {
    lines: RefCell<Vec<String>>,
    echo: bool,
}

impl PhaseSummaryPlugin {
    pub fn new() -> Self {
        Self {
            lines: RefCell::new(Vec::new()),
            echo: true,
        }
    }

    /// Collect summaries without printing them.
    pub fn quiet() -> Self {
        Self {
            lines: RefCell::new(Vec::new()),
            echo: false,
        }
    }

    /// All summary lines produced so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl Default for PhaseSummaryPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PhaseSummaryPlugin {
    fn name(&self) -> &'static str {
        "phase-summary"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        let count = ctx.error_count();
        let line = format!(
            "[{}] done, {} error{} so far",
            phase,
            count,
            if count == 1 { "" } else { "s" }
        );
        if self.echo {
            eprintln!("{}", line);
        }
        self.lines.borrow_mut().push(line);
        Ok(())
    }
}
