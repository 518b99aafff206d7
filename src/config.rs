//! Configuration management for fortran-linter.
//!
//! This module provides the [`Config`] struct which controls checking behavior.
//! Configuration can be loaded from:
//! - TOML files (`fortran-linter.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`! fortran-linter: --line-length 80`)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being checked up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::rules::DEFAULT_LINE_LENGTH;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["fortran-linter.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

fn default_line_length() -> usize {
    DEFAULT_LINE_LENGTH
}

/// Main configuration struct for fortran-linter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum line length (default: 120)
    #[serde(default = "default_line_length")]
    pub line_length: usize,

    /// Write corrected lines back to the checked file (default: false)
    #[serde(default)]
    pub fix: bool,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub line_length: Option<usize>,
    pub fix: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            line_length: DEFAULT_LINE_LENGTH,
            fix: false,
        }
    }
}

impl Config {
    /// Maximum reasonable line length
    const MAX_LINE_LENGTH: usize = 1000;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.line_length == 0 {
            return Some("line_length must be at least 1".to_string());
        }
        if self.line_length > Self::MAX_LINE_LENGTH {
            return Some(format!(
                "line_length {} exceeds maximum of {}",
                self.line_length,
                Self::MAX_LINE_LENGTH
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.line_length {
            self.line_length = v;
        }
        if let Some(v) = partial.fix {
            self.fix = v;
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // root to current, less specific to more specific
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Unreadable or malformed files are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in &Self::discover_config_files(start_path) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        log::debug!("loaded config {}", path.display());
                        config.apply_partial(&partial);
                    }
                    Err(e) => log::warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => log::warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.line_length, 120);
        assert!(!config.fix);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut base = Config {
            fix: true,
            ..Default::default()
        };
        let partial = PartialConfig {
            line_length: Some(80),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert_eq!(base.line_length, 80);
        assert!(base.fix);
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fortran-linter.toml");
        std::fs::write(&path, "line_length = 72\n").unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.line_length, 72);
        assert!(!config.fix);
    }

    #[test]
    fn test_from_toml_file_rejects_bad_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fortran-linter.toml");
        std::fs::write(&path, "line_length = \"long\"\n").unwrap();

        assert!(Config::from_toml_file(&path).is_err());
    }

    #[test]
    fn test_discovered_files_nearest_wins() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("src");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(
            root.path().join("fortran-linter.toml"),
            "line_length = 100\nfix = true\n",
        )
        .unwrap();
        std::fs::write(nested.join("fortran-linter.toml"), "line_length = 80\n").unwrap();
        let file = nested.join("main.f90");
        std::fs::write(&file, "program main\nend program main\n").unwrap();

        let discovered = Config::discover_config_files(&file);
        let root_config = root.path().join("fortran-linter.toml");
        let nested_config = nested.join("fortran-linter.toml");
        let root_idx = discovered.iter().position(|p| *p == root_config).unwrap();
        let nested_idx = discovered.iter().position(|p| *p == nested_config).unwrap();
        assert!(root_idx < nested_idx);

        let config = Config::from_discovered_files(&file);
        assert_eq!(config.line_length, 80);
        assert!(config.fix);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_none());
    }

    #[test]
    fn test_validate_line_length_zero() {
        let config = Config {
            line_length: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap().contains("line_length"));
    }

    #[test]
    fn test_validate_line_length_too_large() {
        let config = Config {
            line_length: 5000,
            ..Default::default()
        };
        assert!(config.validate().is_some());
    }
}
