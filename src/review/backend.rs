//! Review capability invocation.
//!
//! The reviewing agent is an opaque external process. [`ClaudeBackend`] runs
//! it inside the working tree under a hard timeout and resolves its answer:
//! the agent is expected to leave a report file under `tmp/doc-reviewer/`,
//! with its raw stdout as the fallback. That filesystem convention lives
//! entirely behind the [`ReviewBackend`] trait so the harness never depends
//! on it.

use crate::errors::InvokeError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Hard cap on a single review invocation.
pub const DEFAULT_REVIEW_TIMEOUT_SECS: u64 = 420;

/// Default review CLI command.
pub const DEFAULT_REVIEW_CMD: &str = "claude";

/// Instruction handed to the reviewer for every case.
pub const REVIEW_INSTRUCTION: &str = "Use doc-reviewer subagent to review the staged \
    documentation changes. Return the output file only. If no output file is given, it failed";

/// Where the reviewer leaves its report, relative to the working tree.
const OUTPUT_DIR: &str = "tmp/doc-reviewer";
const OUTPUT_PREFIX: &str = "doc-reviewer-";
const OUTPUT_SUFFIX: &str = ".md";

/// An external capability that reviews the staged change in a working tree.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Review the staged change in `tree`, returning the report text.
    ///
    /// Timeouts and spawn failures surface as [`InvokeError`]; the driver
    /// treats them as an absent report, not as suite failures.
    async fn review(&self, tree: &Path, instruction: &str) -> Result<String, InvokeError>;
}

/// Invokes the Claude CLI in the working tree and scrapes its answer.
#[derive(Debug, Clone)]
pub struct ClaudeBackend {
    cmd: String,
    timeout: Duration,
    skip_permissions: bool,
}

impl Default for ClaudeBackend {
    fn default() -> Self {
        Self {
            cmd: DEFAULT_REVIEW_CMD.to_string(),
            timeout: Duration::from_secs(DEFAULT_REVIEW_TIMEOUT_SECS),
            skip_permissions: true,
        }
    }
}

impl ClaudeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the review CLI command.
    pub fn with_cmd(mut self, cmd: &str) -> Self {
        self.cmd = cmd.to_string();
        self
    }

    /// Set the invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ReviewBackend for ClaudeBackend {
    async fn review(&self, tree: &Path, instruction: &str) -> Result<String, InvokeError> {
        let mut cmd = Command::new(&self.cmd);
        cmd.arg("--print");
        if self.skip_permissions {
            cmd.arg("--dangerously-skip-permissions");
        }
        cmd.arg(instruction)
            .current_dir(tree)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out reviewer must not outlive its test case.
            .kill_on_drop(true);

        let child = cmd.spawn().map_err(InvokeError::Spawn)?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| InvokeError::Timeout {
                seconds: self.timeout.as_secs(),
            })??;

        if !output.stderr.is_empty() {
            debug!(
                stderr = %String::from_utf8_lossy(&output.stderr),
                "reviewer stderr"
            );
        }

        // A report file inside the tree is authoritative; stdout is the
        // fallback even on a non-zero exit.
        if let Some(artifact) = latest_artifact(tree) {
            debug!(path = %artifact.display(), "using review artifact file");
            return std::fs::read_to_string(&artifact).map_err(InvokeError::Io);
        }

        debug!("no review artifact found, falling back to stdout");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Most recently modified report artifact inside the tree, if any.
fn latest_artifact(tree: &Path) -> Option<PathBuf> {
    let entries = std::fs::read_dir(tree.join(OUTPUT_DIR)).ok()?;
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(OUTPUT_PREFIX) || !name.ends_with(OUTPUT_SUFFIX) {
            continue;
        }
        let Ok(meta) = entry.metadata() else { continue };
        let Ok(mtime) = meta.modified() else { continue };
        if newest.as_ref().is_none_or(|(best, _)| mtime > *best) {
            newest = Some((mtime, entry.path()));
        }
    }

    newest.map(|(_, path)| path)
}
