//! References (branches and HEAD)
//!
//! References are human-readable names pointing to commits:
//!
//! - Branches: one file per branch under `refs/heads/`, content = full
//!   commit id
//! - HEAD: symbolic reference naming the current branch, content =
//!   `ref: refs/heads/<branch>` (HEAD always names a branch, never a raw
//!   commit id)

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use walkdir::WalkDir;

/// Regex pattern for parsing the symbolic HEAD reference
const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// References manager
///
/// Handles reading and writing branch files and the symbolic HEAD.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository metadata directory (typically `.kit`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    /// Point HEAD at the given branch
    pub fn set_head(&self, branch_name: &str) -> anyhow::Result<()> {
        std::fs::write(
            self.head_path(),
            format!("ref: refs/heads/{branch_name}"),
        )
        .context("Unable to write HEAD")
    }

    /// Name of the branch HEAD currently points at
    pub fn current_branch(&self) -> anyhow::Result<String> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .context(format!("Unable to read HEAD at {}", head_path.display()))?;
        let content = content.trim();

        let captures = regex::Regex::new(SYMREF_REGEX)?
            .captures(content)
            .ok_or_else(|| anyhow::anyhow!("Malformed HEAD reference: {content}"))?;

        Ok(captures[1].to_string())
    }

    /// Commit id the current branch points at
    pub fn read_head_oid(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_branch(&self.current_branch()?)
    }

    /// Read the commit id a branch points at
    ///
    /// # Returns
    ///
    /// None if the branch file does not exist or is empty
    pub fn read_branch(&self, branch_name: &str) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.heads_path().join(branch_name);

        if !branch_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path).context(format!(
            "Unable to read branch file {}",
            branch_path.display()
        ))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content.to_string())?))
    }

    /// Move a branch to point at a new commit, creating it if necessary
    pub fn update_branch(&self, branch_name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(branch_name);

        std::fs::create_dir_all(branch_path.parent().context(format!(
            "Invalid branch path {}",
            branch_path.display()
        ))?)?;

        std::fs::write(&branch_path, oid.as_ref()).context(format!(
            "Unable to write branch file {}",
            branch_path.display()
        ))
    }

    /// Create a new branch pointing at the given commit
    pub fn create_branch(&self, branch_name: &str, oid: &ObjectId) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.branch_exists(branch_name),
            "branch {branch_name} already exists"
        );

        self.update_branch(branch_name, oid)
    }

    pub fn delete_branch(&self, branch_name: &str) -> anyhow::Result<()> {
        let branch_path = self.heads_path().join(branch_name);

        std::fs::remove_file(&branch_path).context(format!(
            "Unable to delete branch file {}",
            branch_path.display()
        ))
    }

    pub fn branch_exists(&self, branch_name: &str) -> bool {
        self.heads_path().join(branch_name).exists()
    }

    /// List all branch names, in lexicographic order
    pub fn list_branches(&self) -> anyhow::Result<Vec<String>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(heads_path.as_ref())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(heads_path.as_ref()).ok()?;
                Some(relative_path.to_string_lossy().to_string())
            })
            .collect::<Vec<_>>();

        branches.sort();
        Ok(branches)
    }
}
