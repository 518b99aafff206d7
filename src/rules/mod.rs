//! Rule definitions and catalog compilation.
//!
//! This module turns rule templates into an executable rule tree:
//! - [`fragments`]: Named regex snippet lists and `{placeholder}` interpolation
//! - [`template`]: Uncompiled rules and their three kinds of correction
//! - [`fortran`]: The built-in Fortran fragments and rule set
//! - [`transform`]: Programmatic corrections
//! - [`catalog`]: Compilation into a [`RuleCatalog`] of [`RuleNode`]s

pub mod catalog;
pub mod fortran;
pub mod fragments;
pub mod template;
pub mod transform;

pub use catalog::{CompiledRule, RuleCatalog, RuleNode};
pub use fortran::{default_fragments, default_rules, DEFAULT_LINE_LENGTH};
pub use fragments::{FragmentTable, Placeholders};
pub use template::{Replacement, RuleTemplate, TemplateNode, TransformFn};
pub use transform::to_lowercase;
