// crates/file_finder/src/lib.rs

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};
use wildmatch::WildMatch;

/// Directories never worth descending into.
const SKIPPED_DIRS: &[&str] = &[".git", "target"];

/// Lists every file below `root` whose extension (with its leading dot, e.g. `.rb`)
/// is one of `extensions`, minus anything matching an exclusion pattern.
///
/// Paths come back in a stable, file-name-sorted walk order.
pub fn list_files(root: &Path, extensions: &[String], exclusions: &[String]) -> Vec<PathBuf> {
    let finder = FileFinder::new(root, extensions, exclusions);
    finder.list()
}

/// Drops every path matching one of `exclusions`.
///
/// Patterns are matched against the whole path: `*` and `?` are wildcards and
/// `*` also crosses `/`, so `/project/spec/**` excludes that whole tree.
pub fn filter_excluded_files(paths: Vec<PathBuf>, exclusions: &[String]) -> Vec<PathBuf> {
    let patterns = compile(exclusions);
    paths
        .into_iter()
        .filter(|path| !is_excluded(path, &patterns))
        .collect()
}

// === Private Implementation === //

struct FileFinder<'a> {
    root: &'a Path,
    extensions: &'a [String],
    patterns: Vec<WildMatch>,
}

impl<'a> FileFinder<'a> {
    fn new(root: &'a Path, extensions: &'a [String], exclusions: &[String]) -> Self {
        Self {
            root,
            extensions,
            patterns: compile(exclusions),
        }
    }

    fn list(&self) -> Vec<PathBuf> {
        let files: Vec<PathBuf> = WalkDir::new(self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| self.has_wanted_extension(path))
            .filter(|path| !is_excluded(path, &self.patterns))
            .collect();

        log::debug!(
            "{} file(s) under {} with extensions {:?}",
            files.len(),
            self.root.display(),
            self.extensions
        );
        files
    }

    fn has_wanted_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| {
                let dotted = format!(".{}", ext);
                self.extensions.iter().any(|wanted| *wanted == dotted)
            })
            .unwrap_or(false)
    }
}

fn compile(exclusions: &[String]) -> Vec<WildMatch> {
    exclusions.iter().map(|pattern| WildMatch::new(pattern)).collect()
}

fn is_excluded(path: &Path, patterns: &[WildMatch]) -> bool {
    let text = path.to_string_lossy();
    let excluded = patterns.iter().any(|pattern| pattern.matches(&text));
    if excluded {
        log::debug!("excluding {}", path.display());
    }
    excluded
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
}
