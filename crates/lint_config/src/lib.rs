// crates/lint_config/src/lib.rs

//! Runtime configuration composed from the command line, the project config
//! file, and defaults, in that order of precedence.

mod config_file;

use due_date::DueDateError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use todo_marker::TagTable;

pub use config_file::{read_config_file, ConfigFileOptions, DEFAULT_CONFIG_FILE};

/// Extensions checked when neither the command line nor the config file say otherwise.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".rb"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid date for tag {tag}: {source}")]
    TagDate {
        tag: String,
        #[source]
        source: DueDateError,
    },
}

/// What to do with the todos once they are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Complain about problematic todos and fail if there are any.
    #[default]
    Lint,
    /// List every todo, most urgent first.
    Report,
}

/// Options as given on the command line, before any merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config_file: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub excluded_files: Vec<String>,
    pub report: bool,
    pub verbose: bool,
    pub files: Vec<PathBuf>,
}

/// Everything a run needs. Assembled once, then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Directory scanned when no explicit files are given; listing paths are relative to it.
    pub root: PathBuf,
    pub extensions: Vec<String>,
    /// Absolute glob patterns.
    pub excluded_files: Vec<String>,
    pub tags: TagTable,
    pub mode: Mode,
    /// Explicit files to check instead of walking `root`.
    pub files: Vec<PathBuf>,
    pub verbose: bool,
}

impl LintConfig {
    /// Merges command line options with the config file (the one named on the
    /// command line, or `.todo_lint.yml` in `cwd` if it exists).
    pub fn assemble(cli: CliOptions, cwd: &Path) -> Result<Self, ConfigError> {
        let config_path = match cli.config_file {
            Some(ref path) => Some(cwd.join(path)),
            None => {
                let default = cwd.join(DEFAULT_CONFIG_FILE);
                default.is_file().then_some(default)
            }
        };

        let file_options = match config_path {
            Some(ref path) => {
                log::info!("reading config from {}", path.display());
                read_config_file(path)?
            }
            None => ConfigFileOptions::default(),
        };

        let extensions = cli
            .extensions
            .or(file_options.extensions)
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect())
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect();

        let mut excluded_files = file_options.excluded_files;
        excluded_files.extend(
            cli.excluded_files
                .iter()
                .map(|short_file| cwd.join(short_file).to_string_lossy().into_owned()),
        );

        let files = cli.files.iter().map(|file| cwd.join(file)).collect();

        Ok(Self {
            root: cwd.to_path_buf(),
            extensions,
            excluded_files,
            tags: file_options.tags,
            mode: if cli.report { Mode::Report } else { Mode::Lint },
            files,
            verbose: cli.verbose,
        })
    }
}

/// `rb` and `.rb` both mean `.rb`.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let dir = TempDir::new().unwrap();
        let config = LintConfig::assemble(CliOptions::default(), dir.path()).unwrap();
        assert_eq!(config.extensions, vec![".rb"]);
        assert!(config.excluded_files.is_empty());
        assert!(config.tags.is_empty());
        assert_eq!(config.mode, Mode::Lint);
        assert_eq!(config.root, dir.path());
    }

    #[test]
    fn test_picks_up_the_default_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "Extensions: [.js]\nTags:\n  \"#shipit\": 2015-08-29\n",
        )
        .unwrap();

        let config = LintConfig::assemble(CliOptions::default(), dir.path()).unwrap();
        assert_eq!(config.extensions, vec![".js"]);
        assert!(config.tags.contains_key("#shipit"));
    }

    #[test]
    fn test_command_line_beats_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("custom.yml"), "Extensions: [.js]\nExclude Files: [a.rb]\n").unwrap();

        let cli = CliOptions {
            config_file: Some(PathBuf::from("custom.yml")),
            extensions: Some(vec!["coffee".to_string()]),
            excluded_files: vec!["b.rb".to_string()],
            report: true,
            ..CliOptions::default()
        };
        let config = LintConfig::assemble(cli, dir.path()).unwrap();

        assert_eq!(config.extensions, vec![".coffee"]);
        assert_eq!(
            config.excluded_files,
            vec![
                dir.path().join("a.rb").to_string_lossy().into_owned(),
                dir.path().join("b.rb").to_string_lossy().into_owned(),
            ]
        );
        assert_eq!(config.mode, Mode::Report);
    }

    #[test]
    fn test_missing_named_config_file() {
        let dir = TempDir::new().unwrap();
        let cli = CliOptions {
            config_file: Some(PathBuf::from("nope.yml")),
            ..CliOptions::default()
        };
        let err = LintConfig::assemble(cli, dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.yml"));
    }

    #[test]
    fn test_explicit_files_are_made_absolute() {
        let dir = TempDir::new().unwrap();
        let cli = CliOptions {
            files: vec![PathBuf::from("lib/app.rb")],
            ..CliOptions::default()
        };
        let config = LintConfig::assemble(cli, dir.path()).unwrap();
        assert_eq!(config.files, vec![dir.path().join("lib/app.rb")]);
    }
}
