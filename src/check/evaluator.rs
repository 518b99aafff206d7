//! Evaluation of a rule tree against one line
//!
//! The walk is a pure function of (node, line context, current line): every
//! node returns an [`Evaluation`] and the parent folds its children's results.
//! Nothing is shared or mutated across lines, so lines can be evaluated in any
//! order or in parallel against the same [`RuleCatalog`].
//!
//! Group semantics depend on depth. The top-level group (depth 0) runs every
//! child. A group nested inside another group stops after the first child that
//! produced at least one hint, which is how suppression rules veto their
//! siblings.
//!
//! Matches are always located in the *original* line; only substitutions and
//! transforms operate on the progressively corrected line.

use super::diagnostic::Diagnostic;
use crate::rules::{CompiledRule, Replacement, RuleCatalog, RuleNode};

/// Per-line input to the evaluator
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub filename: &'a str,
    /// 1-based
    pub line_number: usize,
    /// Unmodified line text, including its trailing newline if any
    pub original: &'a str,
}

impl<'a> LineContext<'a> {
    #[must_use]
    pub fn new(filename: &'a str, line_number: usize, original: &'a str) -> Self {
        Self {
            filename,
            line_number,
            original,
        }
    }

    fn source_line(&self) -> &'a str {
        self.original.trim_end_matches(['\n', '\r'])
    }

    /// 1-based character column of a byte offset in the original line
    fn column(&self, offset: usize) -> usize {
        self.original[..offset].chars().count() + 1
    }
}

/// Outcome of evaluating a node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// The line after all corrections applied so far
    pub line: String,
    /// Matches of the last rule evaluated at this level
    pub hints: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// Substitutions and transforms applied
    pub corrections: usize,
}

impl Evaluation {
    fn unchanged(line: String) -> Self {
        Self {
            line,
            ..Self::default()
        }
    }

    fn absorb(&mut self, child: Evaluation) {
        self.line = child.line;
        self.hints = child.hints;
        self.diagnostics.extend(child.diagnostics);
        self.corrections += child.corrections;
    }
}

/// Walks a catalog over single lines
#[derive(Debug, Clone, Copy)]
pub struct LineEvaluator<'c> {
    catalog: &'c RuleCatalog,
}

impl<'c> LineEvaluator<'c> {
    #[must_use]
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self { catalog }
    }

    /// Run the whole catalog over one line
    #[must_use]
    pub fn evaluate(&self, ctx: &LineContext<'_>) -> Evaluation {
        evaluate_node(self.catalog.root(), ctx, ctx.original.to_string(), 0)
    }
}

/// Evaluate `node` at nesting `depth` (the catalog root is depth 0)
#[must_use]
pub fn evaluate_node(
    node: &RuleNode,
    ctx: &LineContext<'_>,
    line: String,
    depth: usize,
) -> Evaluation {
    match node {
        RuleNode::Leaf(rule) => apply_rule(rule, ctx, line),
        RuleNode::Group(children) => {
            let mut acc = Evaluation::unchanged(line);
            for child in children {
                let current = std::mem::take(&mut acc.line);
                acc.absorb(evaluate_node(child, ctx, current, depth + 1));
                if depth >= 1 && acc.hints > 0 {
                    break;
                }
            }
            acc
        }
    }
}

/// Apply one compiled rule
///
/// Every match in the original line counts as a hint and, when the rule has a
/// message, yields a diagnostic. A `Replace` rule substitutes all pattern
/// matches of the current line once, counting one correction per original
/// match; a `Transform` runs once per match on the match span.
#[must_use]
pub fn apply_rule(rule: &CompiledRule, ctx: &LineContext<'_>, line: String) -> Evaluation {
    let mut outcome = Evaluation::unchanged(line);

    for found in rule.pattern().find_iter(ctx.original) {
        outcome.hints += 1;

        match rule.replacement() {
            Replacement::Transform(transform) => {
                outcome.line = transform(&outcome.line, found.range());
                outcome.corrections += 1;
            }
            Replacement::Replace(_) => outcome.corrections += 1,
            Replacement::Detect => {}
        }

        if let Some(message) = rule.message() {
            let column = ctx.column(found.start());
            log::trace!(
                "{}:{}:{column}: {message}",
                ctx.filename,
                ctx.line_number
            );
            outcome.diagnostics.push(Diagnostic {
                filename: ctx.filename.to_string(),
                line: ctx.line_number,
                column,
                message: message.to_string(),
                source_line: ctx.source_line().to_string(),
            });
        }
    }

    if let Replacement::Replace(template) = rule.replacement() {
        if outcome.hints > 0 {
            outcome.line = rule
                .pattern()
                .replace_all(&outcome.line, template.as_str())
                .into_owned();
        }
    }

    outcome
}
