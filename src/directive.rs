//! Inline directive parsing for `! fortran-linter:` comments
//!
//! Supports in-file configuration overrides via special comments:
//! `! fortran-linter: --line-length 80 --fix`

use std::sync::LazyLock;

use regex::Regex;

use crate::config::Config;

/// Pattern to match fortran-linter directives
static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*!\s*fortran-linter:\s*(.*?)\s*$")
        .unwrap_or_else(|e| panic!("Invalid directive pattern: {e}"))
});

/// Parsed directive options that can override config
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveOverrides {
    pub line_length: Option<usize>,
    pub fix: Option<bool>,
}

impl DirectiveOverrides {
    /// Check if any overrides are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_length.is_none() && self.fix.is_none()
    }

    /// Apply the overrides on top of `config`
    pub fn apply(&self, config: &mut Config) {
        if let Some(line_length) = self.line_length {
            log::debug!("directive override: line_length = {line_length}");
            config.line_length = line_length;
        }
        if let Some(fix) = self.fix {
            log::debug!("directive override: fix = {fix}");
            config.fix = fix;
        }
    }
}

/// Check if a line contains a fortran-linter directive
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    DIRECTIVE_RE.is_match(line)
}

/// Parse a directive line and return option overrides
///
/// Returns `None` if the line is not a directive or sets nothing.
#[must_use]
pub fn parse_directive(line: &str) -> Option<DirectiveOverrides> {
    let caps = DIRECTIVE_RE.captures(line)?;
    parse_directive_args(caps.get(1)?.as_str())
}

fn parse_directive_args(args_str: &str) -> Option<DirectiveOverrides> {
    let mut overrides = DirectiveOverrides::default();
    let mut tokens = args_str.split_whitespace();

    while let Some(token) = tokens.next() {
        match token {
            "-l" | "--line-length" => {
                overrides.line_length = tokens.next().and_then(|v| v.parse().ok());
            }
            "-i" | "--fix" => overrides.fix = Some(true),
            "--no-fix" => overrides.fix = Some(false),
            _ => {
                // Unknown option, skip
            }
        }
    }

    if overrides.is_empty() {
        None
    } else {
        Some(overrides)
    }
}

/// Scan the whole input for directives and return the first found
///
/// Only the first directive is used (subsequent ones are ignored).
pub fn find_directive<R: std::io::BufRead>(input: &mut R) -> Option<DirectiveOverrides> {
    let mut buffer = String::new();

    while input.read_line(&mut buffer).ok()? > 0 {
        if is_directive_line(&buffer) {
            return parse_directive(&buffer);
        }
        buffer.clear();
    }

    None
}
