//! Recursive discovery of data files.

use crate::error::EtlError;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A shell-style file name pattern (`*`, `?` and literal characters).
///
/// As in shell globbing, wildcards at the start of the pattern do not match a
/// leading dot, so hidden files are only matched by patterns like `.*.json`.
#[derive(Debug, Clone)]
pub struct FilePattern {
    pattern: String,
    regex: Regex,
}

impl FilePattern {
    pub fn new(pattern: &str) -> Result<Self, EtlError> {
        let invalid = |reason: &str| EtlError::Pattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };
        if pattern.is_empty() {
            return Err(invalid("pattern is empty"));
        }
        if pattern.contains('/') || pattern.contains('\\') {
            return Err(invalid("pattern must match file names, not paths"));
        }

        let mut expr = String::from("^");
        for c in pattern.chars() {
            match c {
                '*' => expr.push_str(".*"),
                '?' => expr.push('.'),
                c => expr.push_str(&regex::escape(&c.to_string())),
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| invalid(&e.to_string()))?;
        Ok(FilePattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        if file_name.starts_with('.') && !self.pattern.starts_with('.') {
            return false;
        }
        self.regex.is_match(file_name)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// List every file under `root` whose name matches `pattern`.
///
/// Paths are absolute and in traversal order (entries of a directory sorted
/// by name). A missing root yields an empty list.
pub fn locate_files(root: &Path, pattern: &FilePattern) -> Result<Vec<PathBuf>, EtlError> {
    let root = if root.is_absolute() {
        root.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| EtlError::io(root, e))?;
        cwd.join(root)
    };

    if !root.is_dir() {
        warn!("Data directory {:?} does not exist, nothing to load", root);
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let matched = entry
                    .file_name()
                    .to_str()
                    .map(|name| pattern.matches(name))
                    .unwrap_or(false);
                if matched {
                    files.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", root, e);
            }
        }
    }

    info!("{} files found in {:?}", files.len(), root);
    Ok(files)
}
