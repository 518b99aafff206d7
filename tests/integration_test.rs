//! Integration tests for fortran-linter
//!
//! These tests run the built-in Fortran catalog end to end through the
//! public API

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::BufReader;

use fortran_linter::process::check_file;
use fortran_linter::rules::{default_fragments, default_rules, TemplateNode};
use fortran_linter::{check_source, find_directive, Config, FileReport, RuleCatalog};
use pretty_assertions::assert_eq;

fn check(source: &str) -> FileReport {
    let catalog = RuleCatalog::fortran(120).unwrap();
    check_source(&catalog, source, "test.f90")
}

fn messages(report: &FileReport) -> Vec<&str> {
    report
        .sink
        .diagnostics()
        .iter()
        .map(|d| d.message.as_str())
        .collect()
}

#[test]
fn test_clean_line_is_unchanged() {
    let source = "program demo\n  integer :: i\n  x = 1\nend program demo\n";
    let report = check(source);
    assert!(report.is_clean());
    assert_eq!(report.sink.correction_count(), 0);
    assert_eq!(report.corrected_source(), source);
}

#[test]
fn test_top_level_rules_accumulate() {
    let report = check("\tx=1\n");
    assert_eq!(
        messages(&report),
        [
            "Should use 2 spaces instead of tabulation",
            r#"Missing spaces around "=""#
        ]
    );
    assert_eq!(report.corrected_source(), "  x = 1\n");
}

#[test]
fn test_nested_group_reports_first_alternative_only() {
    // "x+1" also matches the "before" and "after" operator rules
    let report = check("  y = x+1\n");
    assert_eq!(messages(&report), ["Missing spaces around operator"]);
    assert_eq!(report.corrected_source(), "  y = x + 1\n");
}

#[test]
fn test_quoted_string_vetoes_punctuation_rule() {
    let report = check("  print *, 'a,b'\n");
    assert!(report.is_clean());
    assert_eq!(report.corrected_source(), "  print *, 'a,b'\n");
}

#[test]
fn test_declaration_vetoes_assignment_spacing() {
    let report = check("  integer :: n=3\n");
    assert!(!messages(&report)
        .iter()
        .any(|m| m.contains(r#""=""#)));
}

#[test]
fn test_column_and_rendering() {
    let report = check("  x=1\n");
    let diagnostics = report.sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].column, 3);
    assert_eq!(
        diagnostics[0].to_string(),
        "test.f90:1:3:\n\n   x=1\n    1\nWarning: Missing spaces around \"=\" at (1)."
    );
}

#[test]
fn test_line_length_boundary() {
    let catalog = RuleCatalog::fortran(10).unwrap();

    let exact = check_source(&catalog, "0123456789\n", "t.f90");
    assert!(exact.is_clean());

    let over = check_source(&catalog, "0123456789A\n", "t.f90");
    assert_eq!(messages(&over), ["Line length > 10 characters"]);
    assert_eq!(over.sink.correction_count(), 0);
}

#[test]
fn test_line_length_boundary_with_crlf_endings() {
    let catalog = RuleCatalog::fortran(10).unwrap();

    let exact = check_source(&catalog, "0123456789\r\n", "t.f90");
    assert!(exact.is_clean());

    let over = check_source(&catalog, "0123456789A\r\n", "t.f90");
    assert_eq!(messages(&over), ["Line length > 10 characters"]);
}

#[test]
fn test_crlf_trailing_whitespace_and_semicolon() {
    let report = check("  x = 1   \r\n  y = 2;\r\n");
    assert_eq!(
        messages(&report),
        ["Trailing whitespaces", r#"Useless ";" at end of line"#]
    );
    assert_eq!(report.corrected_source(), "  x = 1\r\n  y = 2\r\n");
}

#[test]
fn test_uppercase_type_is_lowercased() {
    let report = check("REAL :: x\n");
    assert_eq!(report.corrected_source(), "real :: x\n");
    let diagnostics = report.sink.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "Types should be lowercased");
    assert_eq!(diagnostics[0].column, 1);
}

#[test]
fn test_do_loop_spacing_with_assignment_and_punctuation_groups() {
    let rules = default_rules();
    // the "=" spacing group and the punctuation group
    let templates: Vec<TemplateNode> = vec![rules[14].clone(), rules[3].clone()];
    let catalog = RuleCatalog::from_templates(&templates, &default_fragments(), 120).unwrap();

    let report = check_source(&catalog, "do i=1,10\n", "t.f90");
    assert_eq!(report.corrected_source(), "do i = 1, 10\n");
    assert_eq!(report.sink.correction_count(), 2);
    assert_eq!(
        messages(&report),
        [
            r#"Missing spaces around "=""#,
            "Missing space after punctuation"
        ]
    );
}

#[test]
fn test_do_loop_full_catalog() {
    let report = check("do i=1,10\n");
    assert_eq!(report.corrected_source(), "do i = 1, 10\n");
    let columns: Vec<usize> = report.sink.diagnostics().iter().map(|d| d.column).collect();
    assert_eq!(
        messages(&report),
        [
            "Missing spaces",
            "Missing space after punctuation",
            r#"Missing spaces around "=""#
        ]
    );
    assert_eq!(columns, [1, 7, 4]);
}

#[test]
fn test_corrected_output_is_a_fixed_point() {
    let source = "program demo\n  REAL :: x\n  x=1\n  y = x+1 ! comment\n\tcall foo(a,b)\nend program demo\n";
    let expected = "program demo\n  real :: x\n  x = 1\n  y = x + 1 ! comment\n  call foo(a, b)\nend program demo\n";

    let first = check(source);
    assert_eq!(first.corrected_source(), expected);
    assert_eq!(first.sink.violation_count(), 5);

    let second = check(&first.corrected_source());
    assert!(second.is_clean(), "{}", second.sink.render());
    assert_eq!(second.corrected_source(), expected);
}

#[test]
fn test_diagnostics_follow_line_order() {
    let report = check("x=1\nprogram p\ny=2\n");
    let lines: Vec<usize> = report.sink.diagnostics().iter().map(|d| d.line).collect();
    assert_eq!(lines, [1, 3]);
}

#[test]
fn test_trailing_semicolon_and_whitespace() {
    let report = check("  x = 1;\n  y = 2   \n");
    assert_eq!(report.corrected_source(), "  x = 1\n  y = 2\n");
    assert_eq!(
        messages(&report),
        [r#"Useless ";" at end of line"#, "Trailing whitespaces"]
    );
}

#[test]
fn test_openmp_and_mpi_rules() {
    let report = check("  use omp_lib\n  include 'mpif.h'\n");
    assert_eq!(report.corrected_lines[0], "  !$ use omp_lib\n");
    assert_eq!(
        messages(&report),
        [
            r#"Should prepend with "!$""#,
            "Should use `use mpi_f08` instead (or `use mpi` if not available)"
        ]
    );
}

#[test]
fn test_check_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("demo.f90");
    std::fs::write(&path, "program demo\n  x=1\nend program demo\n").unwrap();

    let reader = BufReader::new(File::open(&path).unwrap());
    let report = check_file(reader, &Config::default(), "demo.f90").unwrap();
    assert_eq!(report.sink.violation_count(), 1);
    assert_eq!(report.sink.diagnostics()[0].filename, "demo.f90");
    assert_eq!(report.sink.diagnostics()[0].line, 2);
    assert_eq!(
        report.corrected_source(),
        "program demo\n  x = 1\nend program demo\n"
    );
}

#[test]
fn test_directive_overrides_line_length() {
    let source = "! fortran-linter: -l 30\nprint *, 'a fairly long string literal'\n";
    let mut config = Config::default();
    let overrides = find_directive(&mut source.as_bytes()).unwrap();
    overrides.apply(&mut config);
    assert_eq!(config.line_length, 30);

    let report = check_file(source.as_bytes(), &config, "t.f90").unwrap();
    let long_lines: Vec<usize> = report
        .sink
        .diagnostics()
        .iter()
        .filter(|d| d.message == "Line length > 30 characters")
        .map(|d| d.line)
        .collect();
    assert_eq!(long_lines, [2]);
}

#[test]
fn test_directive_survives_fix_pass() {
    let source = "! fortran-linter: --line-length 80\nprogram p\n  x=1\nend program p\n";
    let report = check(source);
    assert!(report
        .sink
        .diagnostics()
        .iter()
        .all(|d| d.line != 1));
    assert_eq!(report.sink.violation_count(), 1);

    let fixed = report.corrected_source();
    assert_eq!(
        fixed,
        "! fortran-linter: --line-length 80\nprogram p\n  x = 1\nend program p\n"
    );
    let overrides = find_directive(&mut fixed.as_bytes()).unwrap();
    assert_eq!(overrides.line_length, Some(80));

    let second = check(&fixed);
    assert!(second.is_clean(), "{}", second.sink.render());
}

#[test]
fn test_config_file_drives_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fortran-linter.toml"), "line_length = 12\n").unwrap();
    let path = dir.path().join("long.f90");
    std::fs::write(&path, "call a_long_name\n").unwrap();

    let config = Config::from_discovered_files(&path);
    assert_eq!(config.line_length, 12);

    let reader = BufReader::new(File::open(&path).unwrap());
    let report = check_file(reader, &config, "long.f90").unwrap();
    assert_eq!(messages(&report), ["Line length > 12 characters"]);
}
