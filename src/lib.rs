//! fortran-linter - regex-driven style checker for modern Fortran source code
//!
//! Lines are run through a tree of regex rules. Each rule reports a
//! diagnostic, corrects the line, or suppresses its sibling rules.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod check;
pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod process;
pub mod rules;

// Re-export commonly used types
pub use check::{Diagnostic, DiagnosticSink};
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use directive::{find_directive, parse_directive, DirectiveOverrides};
pub use error::{CatalogError, Result};
pub use process::{check_file, check_source, FileReport};
pub use rules::RuleCatalog;
