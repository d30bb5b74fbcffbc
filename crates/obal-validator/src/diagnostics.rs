use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("ERROR"),
            Severity::Warning => f.write_str("WARNING"),
        }
    }
}

/// A source range with 1-based lines and 0-based columns.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

/// A located validation finding.
///
/// Renders in the canonical form
/// `<SEVERITY> [<file>:(<sl>:<sc>,<el>:<ec>)] <message>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: String,
    pub span: Span,
    pub message: String,
}

impl Diagnostic {
    pub fn error(file: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            file: file.into(),
            span,
            message: message.into(),
        }
    }

    pub fn warning(file: impl Into<String>, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            file: file.into(),
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}:({}:{},{}:{})] {}",
            self.severity,
            self.file,
            self.span.start_line,
            self.span.start_col,
            self.span.end_line,
            self.span.end_col,
            self.message
        )
    }
}

/// Append-only, insertion-ordered diagnostic sink. No deduplication; the
/// matcher emits each finding exactly once.
#[derive(Debug, Default)]
pub struct DiagnosticBus {
    entries: Vec<Diagnostic>,
}

impl DiagnosticBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.severity == Severity::Error)
    }

    /// Take every collected diagnostic, in insertion order.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}

/// Order diagnostics by source file, then span. Stable for equal keys, so
/// same-span findings keep their emission order.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| a.file.cmp(&b.file).then(a.span.cmp(&b.span)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_the_canonical_form() {
        let diagnostic = Diagnostic::error(
            "single_status_code.bal",
            Span::new(8, 5, 10, 6),
            "undefined status code/s '[200]' for return type in the counterpart \
             ballerina service resource (method: 'get', path: '/')",
        );
        assert_eq!(
            diagnostic.to_string(),
            "ERROR [single_status_code.bal:(8:5,10:6)] undefined status code/s '[200]' \
             for return type in the counterpart ballerina service resource \
             (method: 'get', path: '/')"
        );
    }

    #[test]
    fn bus_preserves_insertion_order_and_drains() {
        let mut bus = DiagnosticBus::new();
        bus.report(Diagnostic::error("a.bal", Span::new(1, 0, 1, 1), "first"));
        bus.report(Diagnostic::warning("a.bal", Span::new(2, 0, 2, 1), "second"));
        assert_eq!(bus.len(), 2);
        assert!(bus.has_errors());

        let drained = bus.drain();
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].message, "second");
        assert!(bus.is_empty());
    }

    #[test]
    fn duplicate_reports_are_kept() {
        let mut bus = DiagnosticBus::new();
        let diagnostic = Diagnostic::error("a.bal", Span::new(1, 0, 1, 1), "same");
        bus.report(diagnostic.clone());
        bus.report(diagnostic);
        assert_eq!(bus.len(), 2);
    }

    #[test]
    fn sorting_is_file_then_span_and_stable() {
        let early = Diagnostic::error("b.bal", Span::new(1, 0, 1, 1), "b-early");
        let late = Diagnostic::error("b.bal", Span::new(9, 0, 9, 1), "b-late");
        let first_file = Diagnostic::error("a.bal", Span::new(5, 0, 5, 1), "a");
        let same_span = Diagnostic::error("b.bal", Span::new(1, 0, 1, 1), "b-early-second");

        let mut diagnostics = vec![late, early, first_file, same_span];
        sort_diagnostics(&mut diagnostics);
        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b-early", "b-early-second", "b-late"]);
    }
}
