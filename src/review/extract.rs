//! Findings extraction from review reports.
//!
//! Reports are free-form text with severity section headers. A single
//! forward-moving section state tracks which list subsequent finding headers
//! belong to; [`Section::from_header`] keeps the transition rules testable
//! in isolation from line extraction.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Marker prefix for a finding header line.
const FINDING_MARKER: &str = "Finding #";

/// Which severity section the scan is currently inside.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    /// Before any recognized header.
    #[default]
    None,
    Critical,
    Warnings,
    Suggestions,
}

impl Section {
    /// Section named by `line`, if it is a severity header.
    ///
    /// Matching is case-insensitive. Non-header lines yield `None` and the
    /// scan stays in its current section.
    pub fn from_header(line: &str) -> Option<Section> {
        let upper = line.to_uppercase();
        if upper.contains("CRITICAL ISSUES")
            || (upper.contains("CRITICAL") && upper.contains("MUST FIX"))
        {
            Some(Section::Critical)
        } else if upper.contains("WARNING")
            && (upper.contains("SHOULD FIX") || upper.contains("MEANING CHANGED"))
        {
            Some(Section::Warnings)
        } else if upper.contains("SUGGESTION") && upper.contains("CONSIDER") {
            Some(Section::Suggestions)
        } else {
            None
        }
    }
}

/// Ordered finding headers grouped by severity.
///
/// Empty lists are valid; an absent report yields all three empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingsSet {
    pub critical: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl FindingsSet {
    pub fn is_empty(&self) -> bool {
        self.critical.is_empty() && self.warnings.is_empty() && self.suggestions.is_empty()
    }

    pub fn total(&self) -> usize {
        self.critical.len() + self.warnings.len() + self.suggestions.len()
    }
}

/// Extract finding headers from report text.
///
/// Only "Finding #" header lines are captured, verbatim after trimming;
/// detail lines below a finding are ignored. Pass the empty string for an
/// absent report.
pub fn extract_findings(report: &str) -> FindingsSet {
    let mut findings = FindingsSet::default();
    let mut section = Section::None;

    for line in report.lines() {
        if let Some(next) = Section::from_header(line) {
            debug!(?next, "entered severity section");
            section = next;
            continue;
        }

        let trimmed = line.trim();
        if !trimmed.starts_with(FINDING_MARKER) {
            continue;
        }
        let list = match section {
            Section::None => continue,
            Section::Critical => &mut findings.critical,
            Section::Warnings => &mut findings.warnings,
            Section::Suggestions => &mut findings.suggestions,
        };
        debug!(finding = trimmed, "captured finding header");
        list.push(trimmed.to_string());
    }

    debug!(
        critical = findings.critical.len(),
        warnings = findings.warnings.len(),
        suggestions = findings.suggestions.len(),
        "extraction complete"
    );
    findings
}
