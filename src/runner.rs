//! Sequential evaluation driver.
//!
//! Cases run one at a time: each needs an isolated working tree and a
//! long-running external invocation whose side effects must not leak across
//! cases. The tree is dropped at the end of every iteration, and invocation
//! failures score the case as "no findings" instead of aborting the suite.

use crate::cases::TestCase;
use crate::classify::{EvaluationResult, evaluate};
use crate::patch::parse_patch;
use crate::review::{REVIEW_INSTRUCTION, ReviewBackend, extract_findings};
use crate::stage::StagedRepo;
use console::style;
use tracing::{debug, warn};

/// Runs labeled test cases against a review backend.
pub struct Harness<B: ReviewBackend> {
    backend: B,
}

impl<B: ReviewBackend> Harness<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Run the full suite sequentially, collecting one result per case.
    pub async fn run(&self, cases: &[TestCase]) -> Vec<EvaluationResult> {
        let mut results = Vec::with_capacity(cases.len());
        println!("Running {} test cases...", cases.len());

        for (i, case) in cases.iter().enumerate() {
            println!();
            println!("[{}/{}] Running test: {}", i + 1, cases.len(), case.test_id);
            println!("Description: {}", case.description);

            let result = self.run_case(case).await;

            let status = if result.success {
                style("✓").green()
            } else {
                style("✗").red()
            };
            println!("Result: {} ({})", status, result.classification);

            results.push(result);
        }

        results
    }

    /// Evaluate a single case; never fails the suite.
    async fn run_case(&self, case: &TestCase) -> EvaluationResult {
        let report = self.review_case(case).await;
        let findings = extract_findings(report.as_deref().unwrap_or(""));
        evaluate(case, findings)
    }

    /// Stage the change and obtain a report, mapping every per-case failure
    /// to an absent report.
    async fn review_case(&self, case: &TestCase) -> Option<String> {
        let patch = parse_patch(&case.git_diff);
        if patch.is_empty() {
            debug!(test_id = %case.test_id, "patch named no file, reviewing empty tree");
        }

        let staged = match StagedRepo::from_patch(&patch) {
            Ok(staged) => staged,
            Err(err) => {
                warn!(test_id = %case.test_id, error = %err, "failed to stage working tree");
                return None;
            }
        };

        match self.backend.review(staged.path(), REVIEW_INSTRUCTION).await {
            Ok(report) => Some(report),
            Err(err) => {
                warn!(test_id = %case.test_id, error = %err, "review invocation failed");
                None
            }
        }
        // `staged` drops here, deleting the tree on every path.
    }
}
