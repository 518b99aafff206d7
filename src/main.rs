//! fortran-linter - regex-driven style checker for modern Fortran source code

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::borrow::Cow;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fortran_linter::process::{check_reader, FileReport};
use fortran_linter::rules::RuleCatalog;
use fortran_linter::{build_cli, find_directive, parse_args, CliArgs, Config, Result};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

/// Fortran file extensions to process
const FORTRAN_EXTENSIONS: &[&str] = &[
    "f90", "f95", "f03", "f08", "f18", "f", "for", "ftn", "fpp", "F90", "F95", "F03", "F08", "F18",
    "F", "FOR", "FTN", "FPP",
];

/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

const STDIN_NAME: &str = "stdin";

fn main() -> ExitCode {
    let args = parse_args();

    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // No inputs and running interactively: print usage instead of waiting on stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        if let Err(e) = build_cli().print_help() {
            log::warn!("failed to print help: {e}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(summary) => {
            if !args.silent {
                eprintln!("{summary}");
            }
            summary.exit_code()
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Totals over every checked input
#[derive(Debug, Default)]
struct Summary {
    warnings: usize,
    corrections: usize,
    files: usize,
    errors: usize,
}

impl Summary {
    fn add(&mut self, report: &FileReport) {
        self.warnings += report.sink.violation_count();
        self.corrections += report.sink.correction_count();
        self.files += 1;
    }

    fn exit_code(&self) -> ExitCode {
        if self.errors > 0 {
            ExitCode::from(2)
        } else if self.warnings > 0 {
            ExitCode::from(1)
        } else {
            ExitCode::SUCCESS
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} warning(s), {} correction(s) in {} file(s)",
            self.warnings, self.corrections, self.files
        )
    }
}

/// A checked input together with the configuration it was checked under
struct Checked {
    config: Config,
    report: FileReport,
    /// Corrected source differs from the input bytes
    changed: bool,
}

fn run(args: &CliArgs) -> Result<Summary> {
    let base_config = build_config(args, None)?;
    let base_catalog = RuleCatalog::fortran(base_config.line_length)?;

    if args.reads_stdin() {
        return process_stdin(&base_config, &base_catalog, args);
    }

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                log::warn!("failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(args)?;
    if files.is_empty() {
        log::warn!("no Fortran files found to check");
        return Ok(Summary::default());
    }

    // Explicit config file: one config for all files. Otherwise each file
    // discovers its own.
    let use_per_file_config = args.config.is_none();

    let results: Vec<(&PathBuf, Result<Option<Checked>>)> = files
        .par_iter()
        .map(|path| {
            let result = if use_per_file_config {
                build_config(args, Some(path.as_path()))
                    .and_then(|config| process_single_file(path, &config, &base_catalog))
            } else {
                process_single_file(path, &base_config, &base_catalog)
            };
            (path, result)
        })
        .collect();

    // Diagnostics go to stdout unless stdout carries corrected source
    let mut out: Box<dyn Write> = if args.stdout {
        Box::new(io::stderr().lock())
    } else {
        Box::new(io::stdout().lock())
    };

    let mut summary = Summary::default();
    for (path, result) in results {
        match result {
            Ok(Some(checked)) => {
                print_diagnostics(&mut out, &checked.report, summary.warnings == 0)?;
                summary.add(&checked.report);
                if let Err(e) = write_output(path, &checked, args) {
                    summary.errors += 1;
                    eprintln!("Error writing {}: {e:#}", path.display());
                }
            }
            Ok(None) => {}
            Err(e) => {
                summary.errors += 1;
                eprintln!("Error checking {}: {e:#}", path.display());
            }
        }
    }
    out.flush()?;

    Ok(summary)
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        log::debug!("using explicit config file: {}", config_path.display());
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        if log::log_enabled!(log::Level::Debug) {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                log::debug!("no config files discovered for {}", start.display());
            }
            for f in &discovered {
                log::debug!("discovered config file {}", f.display());
            }
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(line_length) = args.line_length {
        config.line_length = line_length;
    }
    if args.fix {
        config.fix = true;
    }

    log::debug!(
        "configuration: line_length = {}, fix = {}",
        config.line_length,
        config.fix
    );

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Result<Vec<PathBuf>> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                log::warn!("ignoring invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // WalkDir reports symlink loops as errors, which are skipped
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_fortran_file(path)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                for entry in std::fs::read_dir(input)?.filter_map(std::result::Result::ok) {
                    let path = entry.path();
                    if path.is_file() && is_fortran_file(&path) && !is_excluded(&path, &exclude_patterns)
                    {
                        files.push(path);
                    }
                }
            }
        } else {
            anyhow::bail!("{}: no such file or directory", input.display());
        }
    }

    Ok(files)
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path.components().any(|component| match component {
                std::path::Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

fn is_fortran_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FORTRAN_EXTENSIONS.contains(&ext))
}

/// Apply in-file directives, pick a catalog and check `contents`
fn check_contents(
    contents: &[u8],
    config: &Config,
    base_catalog: &RuleCatalog,
    name: &str,
) -> Result<Checked> {
    let mut config = config.clone();
    if let Some(overrides) = find_directive(&mut io::Cursor::new(contents)) {
        log::debug!("found directive in {name}");
        overrides.apply(&mut config);
        if let Some(error) = config.validate() {
            anyhow::bail!("Invalid directive in {name}: {error}");
        }
    }

    let catalog = if base_catalog.line_length() == config.line_length {
        Cow::Borrowed(base_catalog)
    } else {
        Cow::Owned(RuleCatalog::fortran(config.line_length)?)
    };

    let report = check_reader(&catalog, contents, name)?;
    let changed = report.corrected_source().as_bytes() != contents;

    Ok(Checked {
        config,
        report,
        changed,
    })
}

/// Check a single file; `None` when the file was skipped
fn process_single_file(
    path: &Path,
    config: &Config,
    base_catalog: &RuleCatalog,
) -> Result<Option<Checked>> {
    // Check file size BEFORE reading
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        log::warn!(
            "skipping {} ({} MB exceeds limit of {} MB)",
            path.display(),
            file_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
        return Ok(None);
    }

    let contents = std::fs::read(path)?;
    check_contents(&contents, config, base_catalog, &path.display().to_string()).map(Some)
}

/// Write a report's diagnostic blocks, separated from earlier blocks by a blank line
fn print_diagnostics<W: Write + ?Sized>(
    out: &mut W,
    report: &FileReport,
    first_block: bool,
) -> io::Result<()> {
    if report.is_clean() {
        return Ok(());
    }
    if !first_block {
        writeln!(out)?;
    }
    writeln!(out, "{}", report.sink.render())
}

/// Emit the corrected source: to stdout, or back into the file when fixing
fn write_output(path: &Path, checked: &Checked, args: &CliArgs) -> Result<()> {
    if args.stdout {
        let mut stdout = io::stdout().lock();
        checked.report.write_corrected(&mut stdout)?;
        stdout.flush()?;
    } else if checked.config.fix && checked.changed {
        log::debug!("writing corrections to {}", path.display());
        std::fs::write(path, checked.report.corrected_source())?;
    }
    Ok(())
}

/// Check standard input
///
/// Corrected source is written to stdout when fixing or with `--stdout`;
/// diagnostics then move to stderr.
fn process_stdin(config: &Config, catalog: &RuleCatalog, args: &CliArgs) -> Result<Summary> {
    let mut contents = Vec::new();
    io::stdin().read_to_end(&mut contents)?;

    if contents.len() as u64 > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            contents.len() / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let checked = check_contents(&contents, config, catalog, STDIN_NAME)?;
    let emit_source = args.stdout || checked.config.fix;

    if emit_source {
        print_diagnostics(&mut io::stderr().lock(), &checked.report, true)?;
        let mut stdout = io::stdout().lock();
        checked.report.write_corrected(&mut stdout)?;
        stdout.flush()?;
    } else {
        print_diagnostics(&mut io::stdout().lock(), &checked.report, true)?;
    }

    let mut summary = Summary::default();
    summary.add(&checked.report);
    Ok(summary)
}
