//! Unified-diff reconstruction.
//!
//! Rebuilds the before/after content of the file a diff touches. This is not
//! a general diff parser: the scan keeps only enough state to stage a
//! reviewable change. Only the most recently seen `diff --git` header is
//! tracked, so a multi-file diff attributes earlier content to the last file
//! named. The test corpus stages one documentation file per case.

use regex::Regex;
use std::sync::LazyLock;

static FILE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"a/(.*?) b/").unwrap());

/// Before/after content recovered from a unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPatch {
    /// Path named by the last `diff --git` header, if any.
    pub file: Option<String>,
    /// Content of the file before the change.
    pub original: String,
    /// Content of the file with the change applied.
    pub modified: String,
}

impl ParsedPatch {
    /// True when the diff named no file at all.
    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }
}

/// Scan `diff` line by line and rebuild both sides of the change.
///
/// Rules per line, once a file header has been seen:
/// - `@@` hunk markers and `---`/`+++`/`index` metadata are skipped
/// - `-` contributes to the original sequence only, `+` to the modified one
/// - a leading space contributes the context line to both
/// - `\` no-newline markers are dropped
/// - anything else becomes a blank line in both sequences
pub fn parse_patch(diff: &str) -> ParsedPatch {
    let mut file: Option<String> = None;
    let mut original: Vec<&str> = Vec::new();
    let mut modified: Vec<&str> = Vec::new();

    for line in diff.split('\n') {
        if line.starts_with("diff --git") {
            if let Some(cap) = FILE_HEADER.captures(line) {
                file = Some(cap[1].to_string());
            }
            continue;
        }
        if line.starts_with("@@") || file.is_none() {
            continue;
        }
        if line.starts_with("---") || line.starts_with("+++") || line.starts_with("index") {
            continue;
        }

        if let Some(rest) = line.strip_prefix('-') {
            original.push(rest);
        } else if let Some(rest) = line.strip_prefix('+') {
            modified.push(rest);
        } else if let Some(rest) = line.strip_prefix(' ') {
            original.push(rest);
            modified.push(rest);
        } else if !line.starts_with('\\') {
            original.push("");
            modified.push("");
        }
    }

    ParsedPatch {
        file,
        original: original.join("\n"),
        modified: modified.join("\n"),
    }
}
