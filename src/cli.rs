//! Command-line interface for fortran-linter.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Files or directories to check
    pub inputs: Vec<PathBuf>,

    /// Maximum line length
    pub line_length: Option<usize>,

    /// Path to config file
    pub config: Option<PathBuf>,

    /// Write corrections back to the checked files
    pub fix: bool,

    /// Print corrected source to stdout
    pub stdout: bool,

    /// Recursive directory processing
    pub recursive: bool,

    /// Glob patterns for files/directories to exclude
    pub exclude: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Silent mode (diagnostics only, no summary)
    pub silent: bool,

    /// Debug logging
    pub debug: bool,
}

impl CliArgs {
    /// Inputs name standard input: nothing given, or a lone `-`
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.inputs.is_empty() || (self.inputs.len() == 1 && self.inputs[0].as_os_str() == "-")
    }
}

/// Build the CLI command structure
#[must_use]
pub fn build_cli() -> Command {
    Command::new("fortran-linter")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Regex-driven style checker and fixer for modern Fortran code")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to check (reads stdin when omitted or '-')")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("line-length")
                .short('l')
                .long("line-length")
                .help("Maximum line length [default: 120]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("fix")
                .short('i')
                .long("fix")
                .help("Write corrections back to the checked files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Print the corrected source to stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively check directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Do not print the summary line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug logging (config discovery, catalog, per-file progress)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        line_length: matches.get_one::<usize>("line-length").copied(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        fix: matches.get_flag("fix"),
        stdout: matches.get_flag("stdout"),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        silent: matches.get_flag("silent"),
        debug: matches.get_flag("debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        assert_eq!(cmd.get_name(), "fortran-linter");
        cmd.debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let args = parse_args_from(vec!["fortran-linter"]);
        assert!(args.inputs.is_empty());
        assert_eq!(args.line_length, None);
        assert!(!args.fix);
        assert!(!args.stdout);
        assert!(args.reads_stdin());
    }

    #[test]
    fn test_line_length() {
        let args = parse_args_from(vec!["fortran-linter", "-l", "80", "a.f90"]);
        assert_eq!(args.line_length, Some(80));
        let args = parse_args_from(vec!["fortran-linter", "--line-length", "72", "a.f90"]);
        assert_eq!(args.line_length, Some(72));
    }

    #[test]
    fn test_fix_flags() {
        let args = parse_args_from(vec!["fortran-linter", "-i", "a.f90"]);
        assert!(args.fix);
        let args = parse_args_from(vec!["fortran-linter", "--fix", "--stdout", "a.f90"]);
        assert!(args.fix);
        assert!(args.stdout);
    }

    #[test]
    fn test_dash_reads_stdin() {
        let args = parse_args_from(vec!["fortran-linter", "-"]);
        assert!(args.reads_stdin());
        let args = parse_args_from(vec!["fortran-linter", "-", "a.f90"]);
        assert!(!args.reads_stdin());
    }

    #[test]
    fn test_multiple_inputs() {
        let args = parse_args_from(vec!["fortran-linter", "a.f90", "b.f90"]);
        assert_eq!(
            args.inputs,
            vec![PathBuf::from("a.f90"), PathBuf::from("b.f90")]
        );
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "fortran-linter",
            "-r",
            "-e",
            "*.mod",
            "--exclude",
            "build*",
            "src/",
        ]);
        assert!(args.recursive);
        assert_eq!(args.exclude, vec!["*.mod", "build*"]);
    }

    #[test]
    fn test_exclude_empty() {
        let args = parse_args_from(vec!["fortran-linter", "file.f90"]);
        assert!(args.exclude.is_empty());
    }

    #[test]
    fn test_jobs_and_config() {
        let args = parse_args_from(vec![
            "fortran-linter",
            "-j",
            "4",
            "-c",
            "lint.toml",
            "file.f90",
        ]);
        assert_eq!(args.jobs, Some(4));
        assert_eq!(args.config, Some(PathBuf::from("lint.toml")));
    }

    #[test]
    fn test_silent_and_debug() {
        let args = parse_args_from(vec!["fortran-linter", "-S", "-D", "file.f90"]);
        assert!(args.silent);
        assert!(args.debug);
    }

    #[test]
    fn test_invalid_line_length_rejected() {
        let result = build_cli().try_get_matches_from(vec!["fortran-linter", "-l", "abc"]);
        assert!(result.is_err());
    }
}
