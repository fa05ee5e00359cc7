//! Typed error hierarchy for the evaluation harness.
//!
//! Two enums cover the two failure classes:
//! - `HarnessError` covers fatal configuration and persistence failures
//! - `InvokeError` covers recoverable per-case review-invocation failures

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort the whole run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Test case file not found: {0}")]
    MissingTestCases(PathBuf),

    #[error("Failed to read test cases from {path}: {source}")]
    TestCaseRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse test cases from {path}: {source}")]
    TestCaseParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write results to {path}: {source}")]
    ResultsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode results: {0}")]
    ResultsEncode(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures from a single review invocation.
///
/// These never abort the suite; the driver scores the affected case as if
/// the reviewer produced no report.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Failed to spawn review process: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Review timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Failed to collect review output: {0}")]
    Io(#[from] std::io::Error),
}
