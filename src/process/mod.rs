//! File processing.
//!
//! Splits the input into lines, each keeping its trailing newline, and runs
//! every line through a [`RuleCatalog`](crate::rules::RuleCatalog):
//! - Corrected lines are collected in order, ready to be written back
//! - Diagnostics and the correction count accumulate in a
//!   [`DiagnosticSink`](crate::check::DiagnosticSink)
//!
//! The main entry points are [`check_file`] for buffered readers and
//! [`check_source`] for in-memory text.

pub mod pipeline;

pub use pipeline::{check_file, check_lines_parallel, check_reader, check_source, FileReport};
