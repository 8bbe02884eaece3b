// crates/todo_lint/src/lib.rs

pub mod cli;

use anyhow::{Context, Result};
use colored::Colorize;
use lint_config::{LintConfig, Mode};
use std::io::Write;
use std::path::PathBuf;
use todo_marker::{sort_by_due_date, Marker};

/// What a run found, and how the process should exit because of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub mode: Mode,
    pub files: usize,
    pub todos: usize,
    pub problems: usize,
}

impl RunSummary {
    /// Lint mode fails when anything was charged; report mode never does.
    pub fn exit_code(&self) -> i32 {
        match self.mode {
            Mode::Lint if self.problems > 0 => 1,
            _ => 0,
        }
    }
}

/// Checks the files `config` selects and writes the results to `out`.
pub fn run(config: &LintConfig, out: &mut dyn Write) -> Result<RunSummary> {
    let files = load_files(config);
    log::info!("checking {} file(s)", files.len());

    match config.mode {
        Mode::Lint => lint(config, &files, out),
        Mode::Report => report(config, &files, out),
    }
}

/// Explicit files skip the walk (and the extension filter) but not the exclusions.
pub fn load_files(config: &LintConfig) -> Vec<PathBuf> {
    if config.files.is_empty() {
        file_finder::list_files(&config.root, &config.extensions, &config.excluded_files)
    } else {
        file_finder::filter_excluded_files(config.files.clone(), &config.excluded_files)
    }
}

fn lint(config: &LintConfig, files: &[PathBuf], out: &mut dyn Write) -> Result<RunSummary> {
    let mut reports = Vec::new();
    let mut todos = 0;

    for file in files {
        let markers = Marker::within_file(file, &config.tags)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        todos += markers.len();

        for marker in &markers {
            let charge = judge::evaluate(marker).with_context(|| {
                format!("{}:{}", file.display(), marker.line_number())
            })?;
            match reporter::report(marker, charge.as_ref()) {
                Some(report) => {
                    write!(out, "{}", "F".red())?;
                    reports.push(report);
                }
                None => write!(out, "{}", ".".green())?,
            }
        }
    }
    writeln!(out)?;

    for report in &reports {
        writeln!(out, "\n{}", report)?;
    }

    if reports.is_empty() {
        writeln!(
            out,
            "\nGreat job! No overdue todos in {}",
            pluralize("file", files.len())
        )?;
    } else {
        writeln!(
            out,
            "\nFound {} in {}",
            pluralize("problematic todo", reports.len()),
            pluralize("file", files.len())
        )?;
    }

    Ok(RunSummary {
        mode: Mode::Lint,
        files: files.len(),
        todos,
        problems: reports.len(),
    })
}

fn report(config: &LintConfig, files: &[PathBuf], out: &mut dyn Write) -> Result<RunSummary> {
    let mut markers = Vec::new();
    for file in files {
        markers.extend(
            Marker::within_file(file, &config.tags)
                .with_context(|| format!("Failed to read {}", file.display()))?,
        );
    }
    let todos = markers.len();

    let markers = sort_by_due_date(markers).context("Failed to resolve due dates")?;
    if markers.is_empty() {
        writeln!(out, "No todos found")?;
    }
    for (index, marker) in markers.iter().enumerate() {
        writeln!(out, "{}", reporter::list_entry(index + 1, marker, &config.root)?)?;
    }

    Ok(RunSummary {
        mode: Mode::Report,
        files: files.len(),
        todos,
        problems: 0,
    })
}

fn pluralize(word: &str, count: usize) -> String {
    let s = if count == 1 { "" } else { "s" };
    format!("{} {}{}", count, word, s)
}
