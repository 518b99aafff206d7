//! Line checking against a compiled rule catalog.
//!
//! - [`evaluator`]: Depth-aware walk of the rule tree over one line
//! - [`diagnostic`]: Diagnostic records, their text format and accumulation

pub mod diagnostic;
pub mod evaluator;

pub use diagnostic::{Diagnostic, DiagnosticSink};
pub use evaluator::{apply_rule, evaluate_node, Evaluation, LineContext, LineEvaluator};
