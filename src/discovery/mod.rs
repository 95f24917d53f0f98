// src/discovery/mod.rs
use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use walkdir::WalkDir;

use crate::utils::error::DiscoveryError;

// Characters that make a pattern a glob rather than a literal path.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Expands a shell-style glob pattern into the list of input files to convert.
///
/// Matched paths keep the pattern's literal directory prefix exactly as it was
/// spelled (`./docs/*.html` yields `./docs/page.html`), because the destination
/// path for each conversion is built from the enumerated path string. Results
/// are sorted by file name within each directory, and filtered to paths ending
/// in `html`. The suffix check is a plain substring test rather than an
/// extension test, so `.xhtml` files qualify and `notes.txt` never does.
///
/// A pattern matching nothing returns an empty vec; only an unparseable
/// pattern is an error.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let files = expand(pattern)?;
    Ok(files.into_iter().filter(|path| has_html_suffix(path)).collect())
}

/// Runs the glob against the filesystem, without the `html` suffix filter.
fn expand(pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !pattern.contains(GLOB_META) {
        // No metacharacters: the pattern names a single file, or nothing.
        let path = PathBuf::from(pattern);
        if path.is_file() {
            return Ok(vec![path]);
        }
        return Ok(Vec::new());
    }

    let (prefix, remainder) = split_pattern(pattern);
    let glob = GlobBuilder::new(remainder)
        .literal_separator(true) // `*` must not cross directories, like a shell glob
        .build()
        .map_err(|source| DiscoveryError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
    let matcher = glob.compile_matcher();

    let root = prefix.map_or_else(|| Path::new("."), Path::new);
    let mut matches = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(relative) {
            matches.push(match prefix {
                // Entry paths start with the prefix as spelled in the pattern.
                Some(_) => entry.into_path(),
                None => relative.to_path_buf(),
            });
        }
    }

    Ok(matches)
}

/// Splits a pattern into its literal directory prefix (the walk root) and the
/// remainder that needs glob matching against root-relative paths.
///
/// `./docs/*.html` splits into `Some("./docs/")` and `*.html`; a pattern whose
/// first component already globs (`*.html`) has no prefix and walks `.`.
fn split_pattern(pattern: &str) -> (Option<&str>, &str) {
    let meta = pattern.find(GLOB_META).unwrap_or(pattern.len());
    match pattern[..meta].rfind('/') {
        Some(sep) => (Some(&pattern[..=sep]), &pattern[sep + 1..]),
        None => (None, pattern),
    }
}

fn has_html_suffix(path: &Path) -> bool {
    path.to_string_lossy().ends_with("html")
}
