//! Status computation
//!
//! Builds the full status report as a three-way diff between the current
//! commit, the staging index, and the working tree. Each section is
//! computed independently and kept sorted.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::collections::BTreeMap;

/// Kind of change shown in the "modifications not staged" section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Modified,
    Deleted,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Modified => write!(f, "modified"),
            ChangeKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// Computed status of the repository
#[derive(Debug, Clone)]
pub struct StatusReport {
    /// Name of the checked-out branch
    pub current_branch: String,
    /// Every other branch, sorted
    pub other_branches: Vec<String>,
    /// Filenames staged for addition
    pub staged_files: Vec<String>,
    /// Filenames staged for removal
    pub removed_files: Vec<String>,
    /// Tracked or staged files whose working-tree state diverged
    pub unstaged_changes: BTreeMap<String, ChangeKind>,
    /// Working-tree files neither staged nor tracked
    pub untracked_files: Vec<String>,
}

impl StatusReport {
    pub fn compute(repository: &Repository, index: &Index) -> anyhow::Result<StatusReport> {
        let current_branch = repository.refs().current_branch()?;
        let other_branches = repository
            .refs()
            .list_branches()?
            .into_iter()
            .filter(|branch| branch != &current_branch)
            .collect();

        let (_, current_commit) = repository.current_commit()?;
        let workspace_files = repository.workspace().list_files()?;

        let mut unstaged_changes = BTreeMap::new();
        let mut untracked_files = Vec::new();

        for filename in &workspace_files {
            let blob_oid = repository.workspace().parse_blob(filename)?.object_id()?;

            // tracked in the current commit, changed in the working tree, not staged
            if let Some(tracked_oid) = current_commit.blob_id(filename)
                && tracked_oid != &blob_oid
                && !index.is_staged_for_add(filename)
            {
                unstaged_changes.insert(filename.clone(), ChangeKind::Modified);
            }

            // staged for addition, but with different contents in the working tree
            if let Some(staged_oid) = index.staged_blob_id(filename)
                && staged_oid != &blob_oid
            {
                unstaged_changes.insert(filename.clone(), ChangeKind::Modified);
            }

            if !index.is_staged_for_add(filename) && !current_commit.tracks(filename) {
                untracked_files.push(filename.clone());
            }
        }

        // staged for addition, but deleted in the working tree
        for filename in index.to_add().keys() {
            if !repository.workspace().exists(filename) {
                unstaged_changes.insert(filename.clone(), ChangeKind::Deleted);
            }
        }

        // tracked in the current commit, deleted in the working tree, and
        // not staged for removal
        for filename in current_commit.file_map().keys() {
            if !index.to_remove().contains_key(filename) && !repository.workspace().exists(filename)
            {
                unstaged_changes.insert(filename.clone(), ChangeKind::Deleted);
            }
        }

        Ok(StatusReport {
            current_branch,
            other_branches,
            staged_files: index.to_add().keys().cloned().collect(),
            removed_files: index.to_remove().keys().cloned().collect(),
            unstaged_changes,
            untracked_files,
        })
    }

    /// Whether nothing is staged and nothing diverged
    pub fn is_clean(&self) -> bool {
        self.staged_files.is_empty()
            && self.removed_files.is_empty()
            && self.unstaged_changes.is_empty()
    }
}
