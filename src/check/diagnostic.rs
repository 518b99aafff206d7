//! Diagnostic records and their accumulation
//!
//! Each diagnostic renders as a gfortran-style warning block:
//!
//! ```text
//! file.f90:3:4:
//!
//!  do i=1,10
//!      1
//! Warning: Missing spaces around "=" at (1).
//! ```

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub filename: String,
    /// 1-based line number
    pub line: usize,
    /// 1-based character column of the match start
    pub column: usize,
    pub message: String,
    /// The unmodified line, without its line terminator
    pub source_line: String,
}

impl Diagnostic {
    /// Caret line placing `1` under the reported column
    #[must_use]
    pub fn marker(&self) -> String {
        format!("{}1", " ".repeat(self.column))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:\n\n {}\n {}\nWarning: {} at (1).",
            self.filename,
            self.line,
            self.column,
            self.source_line,
            self.marker(),
            self.message
        )
    }
}

/// Diagnostics in production order plus the running correction count
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    corrections: usize,
}

impl DiagnosticSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line's diagnostics and corrections
    pub fn record<I>(&mut self, diagnostics: I, corrections: usize)
    where
        I: IntoIterator<Item = Diagnostic>,
    {
        self.diagnostics.extend(diagnostics);
        self.corrections += corrections;
    }

    /// Append everything from another sink, keeping order
    pub fn merge(&mut self, other: DiagnosticSink) {
        self.record(other.diagnostics, other.corrections);
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Total diagnostics emitted
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Total substitutions and transforms applied
    #[must_use]
    pub fn correction_count(&self) -> usize {
        self.corrections
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All diagnostic blocks separated by blank lines
    #[must_use]
    pub fn render(&self) -> String {
        self.diagnostics
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
