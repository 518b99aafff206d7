//! The built-in Fortran style rules
//!
//! Top-level entries are independent checks that all run on every line.
//! Nested groups list mutually exclusive alternatives, most specific first;
//! a leading [`RuleTemplate::skip`] entry vetoes the rest of its group.

use super::fragments::FragmentTable;
use super::template::{RuleTemplate, TemplateNode};
use super::transform::to_lowercase;

/// Default maximum line length
pub const DEFAULT_LINE_LENGTH: usize = 120;

const TYPES: &[&str] = &["real", "character", "logical", "integer"];

const OPERATORS: &[&str] = &[
    r"\.eq\.",
    r"\.neq\.",
    r"\.gt\.",
    r"\.lt\.",
    r"\.le\.",
    r"\.leq\.",
    r"\.ge\.",
    r"\.geq\.",
    "==",
    "/=",
    "<=",
    "<",
    ">=",
    ">",
    r"\.and\.",
    r"\.or\.",
    r"\+",
    "-",
    r"\*",
    "/",
];

const STRUCTS: &[&str] = &["if", "select", "case", "while"];

const PUNCTUATION: &[&str] = &[",", r"\)", ";"];

/// Fragment groups referenced by [`default_rules`]
#[must_use]
pub fn default_fragments() -> FragmentTable {
    FragmentTable::new()
        .with_group("types", TYPES.iter().copied())
        .with_group("operators", OPERATORS.iter().copied())
        .with_group("structs", STRUCTS.iter().copied())
        .with_group("punctuation", PUNCTUATION.iter().copied())
}

/// The rule tree, in evaluation order
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn default_rules() -> Vec<TemplateNode> {
    vec![
        // "do i = start, end"
        RuleTemplate::replace(r"do (\w+)=(\S+),(\S+)", "do ${1} = ${2}, ${3}", "Missing spaces")
            .into(),
        TemplateNode::group([
            RuleTemplate::replace(
                r"(\w|\))({operators})(\w|\()",
                "${1} ${2} ${3}",
                "Missing spaces around operator",
            ),
            RuleTemplate::replace(
                r"(\w|\))({operators})",
                "${1} ${2}",
                "Missing space before operator",
            ),
            RuleTemplate::replace(
                r"({operators})(\w|\()",
                "${1} ${2}",
                "Missing space after operator",
            ),
        ]),
        TemplateNode::group([
            RuleTemplate::replace(r"(\S)::(\S)", "${1} :: ${2}", "Missing spaces around separator"),
            RuleTemplate::replace(r"(\S)::", "${1} ::", "Missing space before separator"),
            RuleTemplate::replace(r"::(\S)", ":: ${1}", "Missing space after separator"),
        ]),
        // "this, here" not "this,here"; any quoted string disables the check
        TemplateNode::group([
            RuleTemplate::skip(r"'[^']*'"),
            RuleTemplate::replace(
                r"({punctuation})(\w)",
                "${1} ${2}",
                "Missing space after punctuation",
            ),
        ]),
        RuleTemplate::transform(
            r"\b({types_upper})\s*::",
            to_lowercase,
            "Types should be lowercased",
        )
        .into(),
        RuleTemplate::replace(r"({structs})\(", "${1} (", "Missing space before parenthesis").into(),
        RuleTemplate::replace(
            r"^(\s*)use omp_lib",
            "${1}!$$ use omp_lib",
            r#"Should prepend with "!$""#,
        )
        .into(),
        RuleTemplate::detect(r"^.{linelen_re}.+$", "Line length > {linelen} characters").into(),
        RuleTemplate::replace(r"\t", "  ", "Should use 2 spaces instead of tabulation").into(),
        // "real*4" -> "real(4)"
        RuleTemplate::replace(r"({types})\*(\w+)", "${1}(${2})", "Use new syntax TYPE(kind)")
            .into(),
        // "foo! comment" -> "foo ! comment"
        RuleTemplate::replace(r"(\w)!", "${1} !", "At least one space before comment").into(),
        // "!bar" -> "! bar"
        RuleTemplate::replace(r"!(\s\s+)?(\w)", "! ${2}", "Exactly one space after comment")
            .into(),
        RuleTemplate::replace(r";\s*$", "\n", r#"Useless ";" at end of line"#).into(),
        TemplateNode::group([
            // preprocessor
            RuleTemplate::skip("#endif"),
            RuleTemplate::replace(
                r"end(if|do|subroutine|function)",
                "end ${1}",
                "Missing space after `end'",
            ),
        ]),
        TemplateNode::group([
            RuleTemplate::skip(r"\((kind|len)="),
            RuleTemplate::skip(r"write\s*\(.*\)"),
            RuleTemplate::skip(r"open\s*\([^)]+\)"),
            // declarations
            RuleTemplate::skip("::"),
            RuleTemplate::replace(
                r#" =(\w|\(|\.|\+|-|'|")"#,
                " = ${1}",
                r#"Missing space after "=""#,
            ),
            RuleTemplate::replace(r"(\w|\)|\.)= ", "${1} = ", r#"Missing space before "=""#),
            RuleTemplate::replace(
                r#"(\w|\)|\.)=(\w|\(|\.|\+|-|'|")"#,
                "${1} = ${2}",
                r#"Missing spaces around "=""#,
            ),
        ]),
        RuleTemplate::replace(r"[ \t]+$", "", "Trailing whitespaces").into(),
        RuleTemplate::detect(
            r"\(kind\s*=\s*\d\s*\)",
            r#"You should use "sp" or "dp" instead"#,
        )
        .into(),
        RuleTemplate::replace(r"\(\\([^)]*)\\\)", "[${1}]", r#"You should use "[]" instead"#)
            .into(),
        TemplateNode::group([
            // already conditional
            RuleTemplate::skip(r"!\$"),
            RuleTemplate::replace(
                r"(call |\w+ ?= ?)omp_",
                "!$$ ${1}omp_",
                "Should prepend OpenMP calls with !$",
            ),
        ]),
        RuleTemplate::detect(
            r#"include ["']mpif.h['"]"#,
            "Should use `use mpi_f08` instead (or `use mpi` if not available)",
        )
        .into(),
    ]
}
