// crates/lint_config/src/config_file.rs

use due_date::DueDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use todo_marker::TagTable;

use crate::ConfigError;

/// The project config file looked for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".todo_lint.yml";

/// Shape of `.todo_lint.yml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfigFile {
    #[serde(rename = "Extensions", default)]
    extensions: Option<Vec<String>>,
    #[serde(rename = "Exclude Files", default)]
    exclude_files: Option<Vec<String>>,
    #[serde(rename = "Tags", default)]
    tags: Option<BTreeMap<String, String>>,
}

/// Options read from a config file, with paths already anchored to its directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFileOptions {
    pub extensions: Option<Vec<String>>,
    pub excluded_files: Vec<String>,
    pub tags: TagTable,
}

/// Parses the config file at `path`.
///
/// ```yaml
/// Extensions: [".rb", ".js"]
/// Exclude Files: ["spec/**"]
/// Tags:
///   "#shipit": 2015-08-29
/// ```
pub fn read_config_file(path: &Path) -> Result<ConfigFileOptions, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let starting_path = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    parse_config(&text, path, &starting_path)
}

fn parse_config(text: &str, path: &Path, starting_path: &Path) -> Result<ConfigFileOptions, ConfigError> {
    // An empty file is a valid, empty config.
    let raw: RawConfigFile = if text.trim().is_empty() {
        RawConfigFile::default()
    } else {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };

    let excluded_files = raw
        .exclude_files
        .unwrap_or_default()
        .iter()
        .map(|short_file| starting_path.join(short_file).to_string_lossy().into_owned())
        .collect();

    let mut tags = TagTable::new();
    for (name, date) in raw.tags.unwrap_or_default() {
        let due_date = DueDate::parse_bare(&date).map_err(|source| ConfigError::TagDate {
            tag: name.clone(),
            source,
        })?;
        tags.insert(tag_key(&name), due_date);
    }

    Ok(ConfigFileOptions {
        extensions: raw.extensions,
        excluded_files,
        tags,
    })
}

/// Tags are looked up with their `#`, so `shipit:` in the file means `#shipit`.
fn tag_key(name: &str) -> String {
    if name.starts_with('#') {
        name.to_string()
    } else {
        format!("#{}", name)
    }
}
