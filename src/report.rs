//! Result persistence.
//!
//! Each run writes two correlated files under the results directory: a JSON
//! record with metrics plus every per-case result, and a plain-text summary.
//! Both share one run timestamp. Losing results defeats the evaluation, so
//! write failures are fatal for the run.

use crate::classify::EvaluationResult;
use crate::errors::HarnessError;
use crate::metrics::AggregateMetrics;
use chrono::Local;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct RunRecord<'a> {
    metrics: &'a AggregateMetrics,
    test_results: &'a [EvaluationResult],
    timestamp: &'a str,
}

/// Writes run output under an explicitly configured directory.
///
/// The directory is created on demand at save time, never eagerly.
#[derive(Debug, Clone)]
pub struct ResultsWriter {
    results_dir: PathBuf,
}

impl ResultsWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    /// Persist the detailed record and the summary, returning both paths.
    pub fn save(
        &self,
        results: &[EvaluationResult],
        metrics: &AggregateMetrics,
    ) -> Result<(PathBuf, PathBuf), HarnessError> {
        fs::create_dir_all(&self.results_dir).map_err(|source| HarnessError::ResultsWrite {
            path: self.results_dir.clone(),
            source,
        })?;

        let timestamp = Local::now().format("%Y%m%d-%H%M%S").to_string();

        let results_file = self
            .results_dir
            .join(format!("eval-results-{timestamp}.json"));
        let record = RunRecord {
            metrics,
            test_results: results,
            timestamp: &timestamp,
        };
        let json = serde_json::to_string_pretty(&record)?;
        write_file(&results_file, &json)?;

        let summary_file = self
            .results_dir
            .join(format!("eval-summary-{timestamp}.txt"));
        write_file(&summary_file, &render_summary(metrics, &timestamp))?;

        Ok((results_file, summary_file))
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), HarnessError> {
    fs::write(path, content).map_err(|source| HarnessError::ResultsWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Render the human-readable summary file.
fn render_summary(metrics: &AggregateMetrics, timestamp: &str) -> String {
    let banner = "=".repeat(50);
    let matrix = metrics.confusion_matrix;
    let mut out = String::new();

    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "SEMANTIC PRESERVATION EVALUATION RESULTS");
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Timestamp: {timestamp}");
    let _ = writeln!(out, "Total Tests: {}", metrics.total_tests);
    let _ = writeln!(out, "Passed: {}", metrics.passed);
    let _ = writeln!(out, "Failed: {}", metrics.failed);
    let _ = writeln!(out, "Accuracy: {}", percent(metrics.accuracy));
    let _ = writeln!(out, "Precision: {}", percent(metrics.precision));
    let _ = writeln!(out, "Recall: {}", percent(metrics.recall));
    let _ = writeln!(out, "F1 Score: {}", percent(metrics.f1_score));
    let _ = writeln!(out);
    let _ = writeln!(out, "Confusion Matrix:");
    let _ = writeln!(out, "  True Positives: {}", matrix.true_positive);
    let _ = writeln!(out, "  True Negatives: {}", matrix.true_negative);
    let _ = writeln!(out, "  False Positives: {}", matrix.false_positive);
    let _ = writeln!(out, "  False Negatives: {}", matrix.false_negative);

    out
}

/// Print the final summary to the console.
pub fn print_summary(metrics: &AggregateMetrics) {
    let banner = "=".repeat(50);
    println!();
    println!("{banner}");
    println!("EVALUATION SUMMARY");
    println!("{banner}");
    println!("Accuracy: {}", percent(metrics.accuracy));
    println!("Precision: {}", percent(metrics.precision));
    println!("Recall: {}", percent(metrics.recall));
    println!("F1 Score: {}", percent(metrics.f1_score));
    println!();
    println!("Tests Passed: {}/{}", metrics.passed, metrics.total_tests);
}

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}
