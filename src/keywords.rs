use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::LaunchError;

pub const DEFAULT_KEYWORDS_FILE: &str = "keywords.md";
pub const DEFAULT_LINE_LIMIT: usize = 40;
pub const DEFAULT_MAX_TERMS: usize = 12;

/// Reads at most `limit` lines, counting raw lines and ignoring headings.
///
/// `\n`, `\r\n` and a bare `\r` each end a line.
pub fn read_prefix(path: &Path, limit: usize) -> Result<Vec<String>, LaunchError> {
    let unreadable = |source| LaunchError::KeywordsUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    let mut lines = Vec::new();
    'read: for line in BufReader::new(file).lines() {
        if lines.len() >= limit {
            break;
        }
        let line = line.map_err(unreadable)?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        for piece in line.split('\r') {
            if lines.len() >= limit {
                break 'read;
            }
            lines.push(piece.to_string());
        }
    }

    debug!(path = %path.display(), lines = lines.len(), "read keyword prefix");
    Ok(lines)
}

/// Joins lines with spaces and squeezes runs of spaces.
pub fn flatten(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let ch = if ch == '\n' || ch == '\r' { ' ' } else { ch };
        if ch == ' ' && out.ends_with(' ') {
            continue;
        }
        out.push(ch);
    }
    out.trim_matches(' ').to_string()
}

pub fn prefix_query(path: &Path, limit: usize) -> Result<String, LaunchError> {
    let lines = read_prefix(path, limit)?;
    Ok(flatten(&lines.join("\n")))
}

/// Keyword entries listed under a `## <name>` heading.
///
/// The section runs until the next `## ` heading or a `---` rule. Blank
/// lines and other `#` lines are skipped and a leading `-` bullet is
/// dropped from each entry.
pub fn section_entries(text: &str, name: &str) -> Vec<String> {
    if name.trim().is_empty() {
        return Vec::new();
    }
    let marker = format!("## {}", name.trim().to_lowercase());
    let mut entries = Vec::new();
    let mut inside = false;

    for line in text.lines() {
        let s = line.trim();
        if !inside {
            inside = s.to_lowercase().starts_with(&marker);
            continue;
        }
        if s.starts_with("## ") || s.starts_with("---") {
            break;
        }
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let entry = s.strip_prefix('-').map(str::trim).unwrap_or(s);
        if !entry.is_empty() {
            entries.push(entry.to_string());
        }
    }

    entries
}

pub fn section_query(path: &Path, name: &str, max_terms: usize) -> Result<String, LaunchError> {
    let text = fs::read_to_string(path).map_err(|source| LaunchError::KeywordsUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = section_entries(&text, name);
    debug!(section = name, entries = entries.len(), "extracted section keywords");
    if entries.is_empty() {
        return Err(LaunchError::EmptySection(name.to_string()));
    }

    let picked: Vec<&str> = entries.iter().take(max_terms).map(String::as_str).collect();
    Ok(flatten(&picked.join(" ")))
}
