//! Ephemeral git working trees for review.
//!
//! Each test case gets its own temporary repository holding the document in
//! two states: the original content committed, the modified content staged
//! but not committed, modeling a pending change awaiting review. The tree is
//! deleted when the value is dropped, on success and failure paths alike.

use crate::patch::ParsedPatch;
use anyhow::{Context, Result};
use git2::{IndexAddOption, Repository, Signature};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// An isolated working tree with one staged, uncommitted change.
pub struct StagedRepo {
    dir: TempDir,
}

impl StagedRepo {
    /// Build an isolated repository from a parsed patch.
    ///
    /// If the patch named no file, the repository is initialized but left
    /// empty; review still runs against the empty tree.
    pub fn from_patch(patch: &ParsedPatch) -> Result<Self> {
        let dir = TempDir::new().context("Failed to create working tree directory")?;
        let repo = Repository::init(dir.path()).context("Failed to initialize git repository")?;

        if let Some(ref file) = patch.file {
            let file_path = dir.path().join(file);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }

            fs::write(&file_path, &patch.original)
                .with_context(|| format!("Failed to write {}", file_path.display()))?;
            commit_all(&repo, "Initial commit")?;

            fs::write(&file_path, &patch.modified)
                .with_context(|| format!("Failed to write {}", file_path.display()))?;
            stage_all(&repo)?;
        }

        Ok(Self { dir })
    }

    /// Root of the working tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

fn stage_all(repo: &Repository) -> Result<()> {
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;
    Ok(())
}

fn commit_all(repo: &Repository, message: &str) -> Result<()> {
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
    index.write()?;

    let tree_id = index.write_tree()?;
    let tree = repo.find_tree(tree_id)?;
    let sig = Signature::now("semeval", "semeval@localhost")?;

    // The tree is always fresh, so this is the initial commit on an unborn
    // branch and takes no parents.
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[])?;
    Ok(())
}
