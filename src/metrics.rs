//! Aggregate metrics over a full evaluation run.
//!
//! Metrics are recomputed from scratch from the result list on every run,
//! never mutated incrementally. Degenerate confusion matrices degrade each
//! division to 0 instead of failing.

use crate::classify::{Classification, EvaluationResult};
use serde::{Deserialize, Serialize};

/// Four-way count of classification outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::TruePositive => self.true_positive += 1,
            Classification::TrueNegative => self.true_negative += 1,
            Classification::FalsePositive => self.false_positive += 1,
            Classification::FalseNegative => self.false_negative += 1,
        }
    }
}

/// Derived metrics for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confusion_matrix: ConfusionMatrix,
}

/// Division that degrades to 0 on an empty denominator.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Compute aggregate metrics from the full result list.
pub fn calculate_metrics(results: &[EvaluationResult]) -> AggregateMetrics {
    let mut matrix = ConfusionMatrix::default();
    for result in results {
        matrix.record(result.classification);
    }

    let tp = matrix.true_positive;
    let total = results.len();
    let correct = tp + matrix.true_negative;

    let precision = ratio(tp, tp + matrix.false_positive);
    let recall = ratio(tp, tp + matrix.false_negative);
    let f1_score = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    AggregateMetrics {
        total_tests: total,
        passed: correct,
        failed: total - correct,
        accuracy: ratio(correct, total),
        precision,
        recall,
        f1_score,
        confusion_matrix: matrix,
    }
}
