//! Pipeline orchestrator.

use eyre::Result;

use super::{
    CompilationContext, Phase, Plugin,
    phases::{GeneratePhase, LexPhase, ParsePhase, TypecheckPhase},
};

/// How a pipeline run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// No diagnostics were recorded; contains the generated source text.
    Generated(String),
    /// Diagnostics were recorded before code generation, which did not run.
    Rejected { error_count: usize },
}

/// The compilation pipeline orchestrator.
///
/// Runs lex, parse and typecheck in order, then checks the context for
/// diagnostics. Generation only happens when no phase recorded any.
/// Plugin hooks run before and after each phase.
///
/// # Example
///
/// ```ignore
/// let mut ctx = CompilationContext::new(DebugFlags::default());
/// let id = ctx.register("hello.jakt")?;
/// ctx.set_current_file(id);
///
/// match Pipeline::new(false).run(&mut ctx)? {
///     PipelineOutcome::Generated(cpp) => println!("{cpp}"),
///     PipelineOutcome::Rejected { .. } => ctx.print_errors(),
/// }
/// ```
pub struct Pipeline<L, P, T, G> {
    lex: L,
    parse: P,
    typecheck: T,
    generate: G,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline<LexPhase, ParsePhase, TypecheckPhase, GeneratePhase> {
    /// Create a pipeline with the built-in phases.
    pub fn new(debug_info: bool) -> Self {
        Self::with_phases(
            LexPhase,
            ParsePhase,
            TypecheckPhase,
            GeneratePhase::new(debug_info),
        )
    }
}

impl<L, P, T, G> Pipeline<L, P, T, G>
where
    L: Phase<Input = ()>,
    P: Phase<Input = L::Output>,
    T: Phase<Input = P::Output>,
    G: Phase<Input = T::Output, Output = String>,
{
    /// Create a pipeline from custom phases.
    pub fn with_phases(lex: L, parse: P, typecheck: T, generate: G) -> Self {
        Self {
            lex,
            parse,
            typecheck,
            generate,
            plugins: Vec::new(),
        }
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline on the current file of `ctx`.
    ///
    /// Lex, parse and typecheck always all run, even when an earlier one
    /// recorded diagnostics. Generation runs at most once, and only when
    /// the context holds no diagnostics after typechecking.
    ///
    /// # Errors
    ///
    /// Returns an error if no current file is set, or if a phase or plugin
    /// fails fatally.
    pub fn run(&self, ctx: &mut CompilationContext) -> Result<PipelineOutcome> {
        ctx.current_file()?;
        let debug = ctx.debug();

        let tokens = self.run_phase(&self.lex, ctx, (), debug.lexer)?;
        let parsed = self.run_phase(&self.parse, ctx, tokens, debug.parser)?;
        let checked = self.run_phase(&self.typecheck, ctx, parsed, debug.typechecker)?;

        if ctx.has_errors() {
            let error_count = ctx.error_count();
            tracing::debug!(error_count, "stopping before code generation");
            return Ok(PipelineOutcome::Rejected { error_count });
        }

        let output = self.run_phase(&self.generate, ctx, checked, false)?;
        Ok(PipelineOutcome::Generated(output))
    }

    /// Run a single phase with plugin hooks.
    fn run_phase<X: Phase>(
        &self,
        phase: &X,
        ctx: &mut CompilationContext,
        input: X::Input,
        render: bool,
    ) -> Result<X::Output> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        tracing::debug!(phase = phase_name, "running phase");
        let output = phase.run(ctx, input)?;
        tracing::debug!(phase = phase_name, errors = ctx.error_count(), "phase finished");

        if render {
            eprintln!("{}", phase.render(&output));
        }

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(output)
    }
}
