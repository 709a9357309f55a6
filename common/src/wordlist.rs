//! Newline-delimited wordlists.
//!
//! One entry per line, trimmed. Blank lines and `#` comments are skipped and
//! repeated entries are kept only once, in order of first appearance.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, ScanError};

pub const DEFAULT_DIRECTORIES: &str = include_str!("../data/directories.txt");
pub const DEFAULT_SUBDOMAINS: &str = include_str!("../data/subdomains.txt");

pub fn parse(contents: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

pub fn load(path: &Path) -> Result<Vec<String>> {
    let contents: String = std::fs::read_to_string(path).map_err(|source| ScanError::Wordlist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&contents))
}

/// Loads `path` when given, otherwise parses the embedded `default`.
pub fn load_or(path: Option<&Path>, default: &str) -> Result<Vec<String>> {
    match path {
        Some(path) => load(path),
        None => Ok(parse(default)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
