//! Compiler configuration.

/// Options for one compilation.
///
/// # Example
///
/// ```
/// use cobalt_compiler::CompilerOptions;
///
/// let options = CompilerOptions::default()
///     .with_indent_width(2)
///     .with_error_limit(10)
///     .with_translation_unit("shapes");
///
/// assert_eq!(options.indent_width, 2);
/// assert_eq!(options.error_limit, Some(10));
/// assert!(options.emit_banner);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Spaces per indentation level in generated text.
    pub indent_width: usize,
    /// Emit a leading comment naming the translation unit.
    pub emit_banner: bool,
    /// Stop recording diagnostics after this many.
    pub error_limit: Option<usize>,
    /// Name of the translation unit, used in the banner.
    pub translation_unit: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            emit_banner: true,
            error_limit: None,
            translation_unit: "main".to_string(),
        }
    }
}

impl CompilerOptions {
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_banner(mut self, emit: bool) -> Self {
        self.emit_banner = emit;
        self
    }

    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = Some(limit);
        self
    }

    pub fn with_translation_unit(mut self, name: impl Into<String>) -> Self {
        self.translation_unit = name.into();
        self
    }
}
