//! Checkout migration and overwrite protection
//!
//! A migration moves the working tree from the current commit's snapshot to
//! a target commit's snapshot: every file in the target is written from its
//! blob, and every file tracked only by the current commit is deleted.
//!
//! The untracked-overwrite safety check runs first and is shared by branch
//! checkout, reset, and merge: a working-tree file that is neither staged
//! for addition nor tracked by the current commit must not be tracked by
//! the target, or the operation would silently destroy it.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::KitError;
use derive_new::new;

#[derive(new)]
pub struct Migration<'r> {
    repository: &'r Repository,
}

impl Migration<'_> {
    /// Fail if any untracked working-tree file would be overwritten by the
    /// target commit
    pub fn check_untracked(
        &self,
        current: &Commit,
        target: &Commit,
        index: &Index,
    ) -> anyhow::Result<()> {
        for filename in self.repository.workspace().list_files()? {
            if !index.is_staged_for_add(&filename)
                && !current.tracks(&filename)
                && target.tracks(&filename)
            {
                anyhow::bail!(KitError::UntrackedFileInTheWay);
            }
        }

        Ok(())
    }

    /// Reconcile the working tree from the current to the target snapshot
    pub fn apply(&self, current: &Commit, target: &Commit) -> anyhow::Result<()> {
        for (filename, blob_oid) in target.file_map() {
            let blob = self.repository.database().load_blob(blob_oid)?;
            self.repository
                .workspace()
                .write_file(filename, blob.content())?;
        }

        for filename in current.file_map().keys() {
            if !target.tracks(filename) {
                self.repository.workspace().delete_file(filename)?;
            }
        }

        Ok(())
    }

    /// Overwrite (or create) a single working-tree file from a commit's
    /// recorded blob
    pub fn restore_file(&self, commit: &Commit, filename: &str) -> anyhow::Result<()> {
        let blob_oid = commit
            .blob_id(filename)
            .ok_or(KitError::FileNotInCommit)?;
        let blob = self.repository.database().load_blob(blob_oid)?;

        self.repository
            .workspace()
            .write_file(filename, blob.content())
    }
}
