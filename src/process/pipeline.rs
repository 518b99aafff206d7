//! Line-by-line checking pipeline

use std::io::{BufRead, Write};

use rayon::prelude::*;

use crate::check::{DiagnosticSink, Evaluation, LineContext, LineEvaluator};
use crate::config::Config;
use crate::directive::is_directive_line;
use crate::rules::RuleCatalog;
use crate::Result;

/// Checking result for one input
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    pub filename: String,
    /// One entry per input line, terminators included
    pub corrected_lines: Vec<String>,
    pub sink: DiagnosticSink,
}

impl FileReport {
    fn collect<I>(filename: &str, evaluations: I) -> Self
    where
        I: IntoIterator<Item = Evaluation>,
    {
        let mut report = FileReport {
            filename: filename.to_string(),
            ..Self::default()
        };
        for evaluation in evaluations {
            report
                .sink
                .record(evaluation.diagnostics, evaluation.corrections);
            report.corrected_lines.push(evaluation.line);
        }
        report
    }

    #[must_use]
    pub fn corrected_source(&self) -> String {
        self.corrected_lines.concat()
    }

    /// No diagnostics were produced
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.sink.is_empty()
    }

    pub fn write_corrected<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        for line in &self.corrected_lines {
            output.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}

/// Evaluate one raw input line
///
/// `! fortran-linter:` directive lines pass through unchecked. A `\r\n`
/// terminator is seen by the rules as `\n` and restored on the corrected line.
fn evaluate_line(
    evaluator: &LineEvaluator<'_>,
    filename: &str,
    line_number: usize,
    line: &str,
) -> Evaluation {
    if is_directive_line(line) {
        log::trace!("{filename}:{line_number}: directive, not checked");
        return Evaluation {
            line: line.to_string(),
            ..Evaluation::default()
        };
    }

    let Some(body) = line.strip_suffix("\r\n") else {
        return evaluator.evaluate(&LineContext::new(filename, line_number, line));
    };

    let normalized = format!("{body}\n");
    let mut evaluation = evaluator.evaluate(&LineContext::new(filename, line_number, &normalized));
    if let Some(corrected) = evaluation.line.strip_suffix('\n') {
        evaluation.line = format!("{corrected}\r\n");
    }
    evaluation
}

/// Check in-memory source text
#[must_use]
pub fn check_source(catalog: &RuleCatalog, source: &str, filename: &str) -> FileReport {
    let evaluator = LineEvaluator::new(catalog);
    let evaluations = source
        .split_inclusive('\n')
        .enumerate()
        .map(|(idx, line)| evaluate_line(&evaluator, filename, idx + 1, line));

    FileReport::collect(filename, evaluations)
}

/// Same as [`check_source`], evaluating lines concurrently
///
/// Lines are independent, so the result is identical to sequential checking:
/// per-line results are merged back in line order.
#[must_use]
pub fn check_lines_parallel(catalog: &RuleCatalog, source: &str, filename: &str) -> FileReport {
    let evaluator = LineEvaluator::new(catalog);
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let evaluations: Vec<Evaluation> = lines
        .par_iter()
        .enumerate()
        .map(|(idx, line)| evaluate_line(&evaluator, filename, idx + 1, line))
        .collect();

    FileReport::collect(filename, evaluations)
}

/// Read all of `input` and check it against an existing catalog
///
/// Fails if the input cannot be read or is not valid UTF-8; no line is
/// checked in that case.
pub fn check_reader<R: BufRead>(
    catalog: &RuleCatalog,
    mut input: R,
    filename: &str,
) -> Result<FileReport> {
    let mut source = String::new();
    input.read_to_string(&mut source)?;

    log::debug!(
        "checking {filename}: {} lines, line length {}",
        source.lines().count(),
        catalog.line_length()
    );

    Ok(check_source(catalog, &source, filename))
}

/// Build the catalog for `config` and check `input`
pub fn check_file<R: BufRead>(input: R, config: &Config, filename: &str) -> Result<FileReport> {
    let catalog = RuleCatalog::fortran(config.line_length)?;
    check_reader(&catalog, input, filename)
}
