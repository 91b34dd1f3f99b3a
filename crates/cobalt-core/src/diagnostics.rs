//! The diagnostic reporter.
//!
//! [`Diagnostics`] is the one sink every pass reports into. It keeps
//! diagnostics in detection order and owns the abort-vs-continue policy:
//! passes always keep going after an error, and the pipeline consults
//! [`Diagnostics::should_halt`] before it hands out generated code.

use std::fmt;

use crate::{CompilationError, DiagnosticKind, Severity};

/// Ordered collection of diagnostics for one translation unit.
///
/// # Example
///
/// ```
/// use cobalt_core::{CompilationError, DiagnosticKind, Diagnostics, Span};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.report(CompilationError::UndeclaredIdentifier {
///     name: "b".to_string(),
///     span: Span::new(3, 9, 1),
/// });
///
/// assert!(diagnostics.should_halt());
/// assert_eq!(diagnostics.count_of(DiagnosticKind::UndeclaredIdentifier), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<CompilationError>,
    /// Stop recording after this many diagnostics.
    limit: Option<usize>,
    /// Diagnostics dropped because the limit was reached.
    truncated: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that keeps at most `limit` diagnostics.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Record a diagnostic.
    pub fn report(&mut self, error: CompilationError) {
        if self.limit.is_some_and(|limit| self.items.len() >= limit) {
            self.truncated += 1;
            return;
        }
        self.items.push(error);
    }

    /// Record a diagnostic carried by a failed result, passing successes through.
    pub fn record<T>(&mut self, result: Result<T, CompilationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.report(error);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.truncated == 0
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of diagnostics dropped by the limit.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompilationError> {
        self.items.iter()
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn has_kind(&self, kind: DiagnosticKind) -> bool {
        self.items.iter().any(|e| e.kind() == kind)
    }

    pub fn has_errors(&self) -> bool {
        self.truncated > 0 || self.items.iter().any(|e| e.severity() == Severity::Error)
    }

    /// Whether code generation must be suppressed.
    pub fn should_halt(&self) -> bool {
        self.has_errors()
    }

    /// Kinds in detection order.
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.items.iter().map(CompilationError::kind).collect()
    }

    pub fn into_vec(self) -> Vec<CompilationError> {
        self.items
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "error[{}]: {}", error.kind(), error)?;
        }
        if self.truncated > 0 {
            if !self.items.is_empty() {
                writeln!(f)?;
            }
            write!(f, "... {} more diagnostic(s) suppressed", self.truncated)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a CompilationError;
    type IntoIter = std::slice::Iter<'a, CompilationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = CompilationError;
    type IntoIter = std::vec::IntoIter<CompilationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    fn undeclared(name: &str, line: u32) -> CompilationError {
        CompilationError::UndeclaredIdentifier {
            name: name.to_string(),
            span: Span::point(line, 1),
        }
    }

    #[test]
    fn empty_reporter_does_not_halt() {
        let diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        assert!(!diagnostics.should_halt());
        assert_eq!(diagnostics.to_string(), "");
    }

    #[test]
    fn keeps_detection_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(undeclared("a", 1));
        diagnostics.report(CompilationError::type_mismatch("bad", Span::point(2, 1)));
        diagnostics.report(undeclared("c", 3));

        assert_eq!(
            diagnostics.kinds(),
            vec![
                DiagnosticKind::UndeclaredIdentifier,
                DiagnosticKind::TypeMismatch,
                DiagnosticKind::UndeclaredIdentifier,
            ]
        );
        assert_eq!(diagnostics.count_of(DiagnosticKind::UndeclaredIdentifier), 2);
    }

    #[test]
    fn limit_truncates_but_still_halts() {
        let mut diagnostics = Diagnostics::with_limit(1);
        diagnostics.report(undeclared("a", 1));
        diagnostics.report(undeclared("b", 2));
        diagnostics.report(undeclared("c", 3));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.truncated(), 2);
        assert!(diagnostics.should_halt());
        assert!(diagnostics.to_string().ends_with("... 2 more diagnostic(s) suppressed"));
    }

    #[test]
    fn record_passes_values_through() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(diagnostics.record::<u32>(Ok(4)), Some(4));
        assert_eq!(diagnostics.record::<u32>(Err(undeclared("x", 1))), None);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn display_one_line_per_diagnostic() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(undeclared("a", 1));
        diagnostics.report(undeclared("b", 2));
        assert_eq!(
            diagnostics.to_string(),
            "error[UndeclaredIdentifier]: at 1:1: undeclared identifier 'a'\n\
             error[UndeclaredIdentifier]: at 2:1: undeclared identifier 'b'"
        );
    }
}
