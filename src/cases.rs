//! Labeled test-case input.
//!
//! Test cases are loaded once from a fixed-named JSON file in the working
//! directory and are immutable for the rest of the run.

use crate::errors::HarnessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Fixed name of the test-case file, resolved in the working directory.
pub const TEST_CASES_FILE: &str = "test-cases.json";

/// Severity the label author expects the reviewer to assign.
///
/// Carried through to the persisted results but never consulted by the
/// classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedSeverity {
    Critical,
    #[default]
    Warning,
    Suggestion,
}

impl ExpectedSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for ExpectedSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ground-truth label for one test case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SemanticCheck {
    /// Whether the staged change loses meaning-bearing content.
    #[serde(default)]
    pub semantic_loss: bool,
    /// Severity the reviewer is expected to assign.
    #[serde(default)]
    pub severity: ExpectedSeverity,
}

/// One labeled documentation change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub test_id: String,
    pub description: String,
    /// Unified-diff text describing the change under review.
    pub git_diff: String,
    #[serde(default)]
    pub semantic_check: SemanticCheck,
}

/// Load the test-case array from `path`.
pub fn load_test_cases(path: &Path) -> Result<Vec<TestCase>, HarnessError> {
    if !path.exists() {
        return Err(HarnessError::MissingTestCases(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path).map_err(|source| HarnessError::TestCaseRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| HarnessError::TestCaseParse {
        path: path.to_path_buf(),
        source,
    })
}
