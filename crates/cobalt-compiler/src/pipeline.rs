//! The compilation pipeline.
//!
//! ```text
//! Unparsed → Parsed → SymbolsBuilt → Resolved → Validated → Generated
//! ```
//!
//! A [`Compilation`] threads one [`Diagnostics`] value through every pass.
//! All passes run even after errors so that one run surfaces as many
//! diagnostics as possible. Any diagnostic halts the pipeline at
//! `Validated` and the buffered C text is dropped.

use cobalt_core::Diagnostics;
use cobalt_syntax::{Program, count_nodes};

use crate::options::CompilerOptions;
use crate::passes::{InheritanceResolver, SymbolCollector, Translator};

/// Pipeline stage reached by a compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    #[default]
    Unparsed,
    /// A syntax tree was handed over by the front end.
    Parsed,
    SymbolsBuilt,
    Resolved,
    /// Bodies checked. Terminal when diagnostics exist.
    Validated,
    Generated,
}

/// Generated C for one translation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub text: String,
    pub class_count: usize,
    pub function_count: usize,
}

/// Outcome of [`Compilation::run`].
#[derive(Debug, Clone)]
pub struct CompilationResult {
    pub stage: Stage,
    /// Present only when the pipeline reached [`Stage::Generated`].
    pub output: Option<GeneratedSource>,
    pub diagnostics: Diagnostics,
}

impl CompilationResult {
    pub fn is_success(&self) -> bool {
        self.stage == Stage::Generated
    }

    /// `Ok` with the generated source, or every diagnostic.
    pub fn into_result(self) -> Result<GeneratedSource, Diagnostics> {
        match self.output {
            Some(output) if self.diagnostics.is_empty() => Ok(output),
            _ => Err(self.diagnostics),
        }
    }
}

/// One compilation of one translation unit.
#[derive(Debug)]
pub struct Compilation {
    options: CompilerOptions,
    stage: Stage,
    diagnostics: Diagnostics,
}

impl Compilation {
    pub fn new(options: CompilerOptions) -> Self {
        let diagnostics = match options.error_limit {
            Some(limit) => Diagnostics::with_limit(limit),
            None => Diagnostics::new(),
        };
        Self {
            options,
            stage: Stage::Unparsed,
            diagnostics,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Run every pass over `program`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self, program: &Program<'_>) -> CompilationResult {
        self.advance(Stage::Parsed);
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(nodes = count_nodes(program), "tree received");
        }

        let mut table = SymbolCollector::new(&mut self.diagnostics).run(program).table;
        self.advance(Stage::SymbolsBuilt);

        InheritanceResolver::new(&mut table, &mut self.diagnostics).run();
        self.advance(Stage::Resolved);

        let output = Translator::new(&table, program, &self.options, &mut self.diagnostics).run();
        self.advance(Stage::Validated);

        if self.diagnostics.should_halt() {
            tracing::debug!(
                errors = self.diagnostics.len(),
                truncated = self.diagnostics.truncated(),
                "halting before generation"
            );
            return CompilationResult {
                stage: self.stage,
                output: None,
                diagnostics: self.diagnostics,
            };
        }

        self.advance(Stage::Generated);
        tracing::debug!(
            stage = ?self.stage,
            diagnostics = self.diagnostics.len(),
            "compilation finished"
        );
        CompilationResult {
            stage: self.stage,
            output: Some(GeneratedSource {
                text: output.text,
                class_count: output.struct_count,
                function_count: output.function_count,
            }),
            diagnostics: self.diagnostics,
        }
    }

    fn advance(&mut self, stage: Stage) {
        tracing::trace!(from = ?self.stage, to = ?stage, "stage");
        self.stage = stage;
    }
}

/// Compile `program` with the default options.
pub fn compile(program: &Program<'_>) -> Result<GeneratedSource, Diagnostics> {
    compile_with(program, &CompilerOptions::default())
}

/// Compile `program` with explicit options.
#[tracing::instrument(skip_all, fields(classes = program.classes.len()))]
pub fn compile_with(
    program: &Program<'_>,
    options: &CompilerOptions,
) -> Result<GeneratedSource, Diagnostics> {
    Compilation::new(options.clone()).run(program).into_result()
}
