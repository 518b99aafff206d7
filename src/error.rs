//! Error types and result aliases for fortran-linter.
//!
//! This module defines the error handling infrastructure:
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used by file processing and the CLI
//! - [`CatalogError`]: Typed failure of rule catalog construction

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// A rule template that could not be turned into a compiled rule.
///
/// Building a catalog stops at the first failing template, so a partially
/// built catalog never reaches the evaluator.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A `{name}` placeholder has no binding in the fragment table
    #[error("unresolved placeholder `{{{name}}}` in rule template `{template}`")]
    UnresolvedPlaceholder { template: String, name: String },

    /// An interpolated pattern is not a valid regular expression
    #[error("invalid pattern `{pattern}` (from template `{template}`): {source}")]
    InvalidPattern {
        template: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl CatalogError {
    /// The uninterpolated template that failed
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            CatalogError::UnresolvedPlaceholder { template, .. }
            | CatalogError::InvalidPattern { template, .. } => template,
        }
    }
}
