//! Detection classification against ground truth.
//!
//! Only critical findings count as a detection; warnings and suggestions are
//! non-blocking observations and never affect the outcome.

use crate::cases::{ExpectedSeverity, TestCase};
use crate::review::FindingsSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Four-way outcome of comparing detection against the expected label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    TruePositive,
    TrueNegative,
    FalsePositive,
    FalseNegative,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TruePositive => "true_positive",
            Self::TrueNegative => "true_negative",
            Self::FalsePositive => "false_positive",
            Self::FalseNegative => "false_negative",
        }
    }

    /// Whether the detection agreed with the label.
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::TruePositive | Self::TrueNegative)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify an (expected, detected) pair.
pub fn classify(expected: bool, detected: bool) -> Classification {
    match (expected, detected) {
        (true, true) => Classification::TruePositive,
        (true, false) => Classification::FalseNegative,
        (false, true) => Classification::FalsePositive,
        (false, false) => Classification::TrueNegative,
    }
}

/// Scored outcome of one test case, immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub test_id: String,
    pub description: String,
    pub expected_semantic_loss: bool,
    pub expected_severity: ExpectedSeverity,
    pub detected_semantic_loss: bool,
    pub findings: FindingsSet,
    pub classification: Classification,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

/// Score a test case from the findings extracted from its review report.
pub fn evaluate(case: &TestCase, findings: FindingsSet) -> EvaluationResult {
    let expected = case.semantic_check.semantic_loss;
    let detected = !findings.critical.is_empty();
    let classification = classify(expected, detected);

    EvaluationResult {
        test_id: case.test_id.clone(),
        description: case.description.clone(),
        expected_semantic_loss: expected,
        expected_severity: case.semantic_check.severity,
        detected_semantic_loss: detected,
        findings,
        classification,
        success: classification.is_correct(),
        timestamp: Utc::now(),
    }
}
