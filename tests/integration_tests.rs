//! Integration tests for the semeval binary.
//!
//! A stub reviewer script stands in for the external agent so runs are fast
//! and deterministic. The stub is invoked exactly like the real CLI: inside
//! the reconstructed working tree, with the instruction as its final
//! argument.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a semeval Command
fn semeval() -> Command {
    cargo_bin_cmd!("semeval")
}

/// Diff that removes the Lessons column (a semantic loss).
const LESSONS_DIFF: &str = "diff --git a/docs/journal.md b/docs/journal.md\n\
--- a/docs/journal.md\n\
+++ b/docs/journal.md\n\
@@ -1,2 +1,2 @@\n \
# Journal\n\
-| Date | Lessons |\n\
+| Date |";

/// Diff that only reorders paragraphs (no semantic loss); the Lessons
/// column survives as a context line.
const REORDER_DIFF: &str = "diff --git a/docs/journal.md b/docs/journal.md\n\
--- a/docs/journal.md\n\
+++ b/docs/journal.md\n\
@@ -1,4 +1,4 @@\n \
# Journal\n \
| Date | Lessons |\n\
-First paragraph.\n\
-Second paragraph.\n\
+Second paragraph.\n\
+First paragraph.";

/// Stub reviewer mirroring the mock agent: flags a critical loss when the
/// staged document no longer mentions the Lessons column.
const GREP_REVIEWER: &str = r###"#!/bin/sh
if [ -f docs/journal.md ] && ! grep -q "Lessons" docs/journal.md; then
  printf '%s\n' "## CRITICAL ISSUES (MUST FIX)" "Finding #C1: Table column Lessons removed"
else
  printf '%s\n' "## NO SEMANTIC LOSSES DETECTED"
fi
"###;

/// Stub reviewer that never flags anything.
const BLIND_REVIEWER: &str = r###"#!/bin/sh
printf '%s\n' "## NO SEMANTIC LOSSES DETECTED"
"###;

/// Stub reviewer that writes its report as an artifact file and prints only
/// chatter on stdout.
const ARTIFACT_REVIEWER: &str = r###"#!/bin/sh
mkdir -p tmp/doc-reviewer
printf '%s\n' "## CRITICAL ISSUES (MUST FIX)" "Finding #C1: reported via artifact" \
  > tmp/doc-reviewer/doc-reviewer-run.md
echo "Review complete, see the output file."
"###;

/// Stub reviewer that outlives any reasonable timeout.
const SLOW_REVIEWER: &str = "#!/bin/sh\nsleep 30\n";

fn write_reviewer(dir: &TempDir, script: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.path().join("reviewer.sh");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

fn write_test_cases(dir: &TempDir, cases: serde_json::Value) {
    fs::write(
        dir.path().join("test-cases.json"),
        serde_json::to_string_pretty(&cases).unwrap(),
    )
    .unwrap();
}

fn lessons_case(semantic_loss: bool) -> serde_json::Value {
    json!({
        "test_id": "table-column-removal",
        "description": "Removes the Lessons column with no replacement",
        "git_diff": LESSONS_DIFF,
        "semantic_check": {"semantic_loss": semantic_loss, "severity": "critical"}
    })
}

fn reorder_case() -> serde_json::Value {
    json!({
        "test_id": "paragraph-reorder",
        "description": "Reorders paragraphs with all wording preserved",
        "git_diff": REORDER_DIFF,
        "semantic_check": {"semantic_loss": false, "severity": "warning"}
    })
}

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        semeval().arg("--help").assert().success();
    }

    #[test]
    fn test_version() {
        semeval().arg("--version").assert().success();
    }

    #[test]
    fn test_missing_test_cases_exits_one_with_diagnostic() {
        let dir = TempDir::new().unwrap();
        semeval()
            .current_dir(dir.path())
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Test case file not found"));
    }
}

mod full_runs {
    use super::*;

    #[test]
    fn test_accurate_reviewer_passes_the_threshold() {
        let dir = TempDir::new().unwrap();
        let reviewer = write_reviewer(&dir, GREP_REVIEWER);
        write_test_cases(&dir, json!([lessons_case(true), reorder_case()]));

        semeval()
            .current_dir(dir.path())
            .args(["--review-cmd", &reviewer])
            .assert()
            .success()
            .stdout(predicate::str::contains("Running 2 test cases..."))
            .stdout(predicate::str::contains("(true_positive)"))
            .stdout(predicate::str::contains("(true_negative)"))
            .stdout(predicate::str::contains("Tests Passed: 2/2"));
    }

    #[test]
    fn test_blind_reviewer_fails_the_threshold() {
        let dir = TempDir::new().unwrap();
        let reviewer = write_reviewer(&dir, BLIND_REVIEWER);
        write_test_cases(&dir, json!([lessons_case(true), reorder_case()]));

        // One miss out of two cases: accuracy 0.5, below the 0.8 bar.
        semeval()
            .current_dir(dir.path())
            .args(["--review-cmd", &reviewer])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("(false_negative)"))
            .stdout(predicate::str::contains("Tests Passed: 1/2"));
    }

    #[test]
    fn test_artifact_file_is_preferred_over_stdout() {
        let dir = TempDir::new().unwrap();
        let reviewer = write_reviewer(&dir, ARTIFACT_REVIEWER);
        write_test_cases(&dir, json!([lessons_case(true)]));

        semeval()
            .current_dir(dir.path())
            .args(["--review-cmd", &reviewer])
            .assert()
            .success()
            .stdout(predicate::str::contains("(true_positive)"));

        let record = read_results_record(dir.path());
        let findings = &record["test_results"][0]["findings"]["critical"];
        assert_eq!(findings[0], "Finding #C1: reported via artifact");
    }

    #[test]
    fn test_timeout_scores_as_false_negative() {
        let dir = TempDir::new().unwrap();
        let reviewer = write_reviewer(&dir, SLOW_REVIEWER);
        write_test_cases(&dir, json!([lessons_case(true)]));

        semeval()
            .current_dir(dir.path())
            .args(["--review-cmd", &reviewer, "--timeout", "1"])
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::contains("(false_negative)"));
    }
}

mod persisted_results {
    use super::*;

    #[test]
    fn test_run_writes_record_and_summary() {
        let dir = TempDir::new().unwrap();
        let reviewer = write_reviewer(&dir, GREP_REVIEWER);
        write_test_cases(&dir, json!([lessons_case(true), reorder_case()]));

        semeval()
            .current_dir(dir.path())
            .args(["--review-cmd", &reviewer])
            .assert()
            .success()
            .stdout(predicate::str::contains("Results saved to"))
            .stdout(predicate::str::contains("Summary saved to"));

        let results_dir = dir.path().join("results");
        let record = read_results_record(dir.path());
        assert_eq!(record["metrics"]["total_tests"], 2);
        assert_eq!(record["metrics"]["accuracy"], 1.0);
        assert_eq!(record["metrics"]["confusion_matrix"]["true_positive"], 1);
        assert_eq!(record["metrics"]["confusion_matrix"]["true_negative"], 1);

        let summary = fs::read_to_string(find_file(&results_dir, "eval-summary-")).unwrap();
        assert!(summary.contains("Accuracy: 100.00%"));
        assert!(summary.contains("Confusion Matrix:"));
    }

    #[test]
    fn test_results_dir_is_configurable() {
        let dir = TempDir::new().unwrap();
        let reviewer = write_reviewer(&dir, GREP_REVIEWER);
        write_test_cases(&dir, json!([reorder_case()]));

        semeval()
            .current_dir(dir.path())
            .args(["--review-cmd", &reviewer, "--results-dir", "out/run-a"])
            .assert()
            .success();

        assert!(dir.path().join("out/run-a").exists());
        assert!(!dir.path().join("results").exists());
    }
}

fn find_file(dir: &Path, prefix: &str) -> std::path::PathBuf {
    fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.path())
        .find(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with(prefix))
                .unwrap_or(false)
        })
        .unwrap_or_else(|| panic!("no {prefix}* file in {}", dir.display()))
}

fn read_results_record(project_dir: &Path) -> serde_json::Value {
    let results_dir = project_dir.join("results");
    let path = find_file(&results_dir, "eval-results-");
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
