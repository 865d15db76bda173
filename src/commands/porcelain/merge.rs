use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::merge::classification::{MergeAction, classify};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::KitError;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        {
            let mut index = self.index();
            index.rehydrate()?;

            if !index.is_empty() {
                anyhow::bail!(KitError::UncommittedChanges);
            }
        }

        if !self.refs().branch_exists(branch_name) {
            anyhow::bail!(KitError::BranchNotFound);
        }

        let current_branch = self.refs().current_branch()?;
        if current_branch == branch_name {
            anyhow::bail!(KitError::CannotMergeSelf);
        }

        let (head_oid, head_commit) = self.current_commit()?;
        let given_oid = self
            .refs()
            .read_branch(branch_name)?
            .ok_or_else(|| anyhow::anyhow!("branch {branch_name} does not point at a commit"))?;
        let given_commit = self.database().load_commit(&given_oid)?;

        {
            let index = self.index();
            Migration::new(self).check_untracked(&head_commit, &given_commit, &index)?;
        }

        let split_oid = {
            let database = self.database();
            let finder = BCAFinder::new(|oid: &ObjectId| database.slim_commit(oid));
            finder
                .find_best_common_ancestor(&head_oid, &given_oid)?
                .ok_or_else(|| {
                    anyhow::anyhow!("no common ancestor between {head_oid} and {given_oid}")
                })?
        };

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }
        if split_oid == head_oid {
            self.checkout_branch(branch_name)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split_commit = self.database().load_commit(&split_oid)?;
        let actions = classify(
            split_commit.file_map(),
            head_commit.file_map(),
            given_commit.file_map(),
        );

        let mut index = self.index();
        for (filename, action) in actions {
            match action {
                MergeAction::TakeGiven(blob_oid) => {
                    let blob = self.database().load_blob(&blob_oid)?;
                    self.workspace().write_file(&filename, blob.content())?;
                    index.stage_add(&filename, blob_oid);
                }
                MergeAction::Delete => {
                    self.workspace().delete_file(&filename)?;
                    index.unstage_remove(&filename);
                }
                MergeAction::Conflict { current, given } => {
                    let blob_oid =
                        self.write_conflict_file(&filename, current.as_ref(), given.as_ref())?;
                    index.stage_add(&filename, blob_oid);
                    writeln!(self.writer(), "Encountered a merge conflict.")?;
                }
            }
        }
        index.write_updates()?;

        let snapshot = index.apply_to(head_commit.file_map());
        let merge_commit = Commit::new_merge(
            format!("Merged {branch_name} into {current_branch}."),
            head_oid,
            given_oid,
            snapshot,
        );
        let merge_oid = self.database().store(merge_commit)?;
        self.refs().update_branch(&current_branch, &merge_oid)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }

    /// Write a conflicted working file combining both sides, store it as a
    /// blob, and return the new blob id
    fn write_conflict_file(
        &self,
        filename: &str,
        current: Option<&ObjectId>,
        given: Option<&ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let mut content = Vec::new();

        content.extend_from_slice(b"<<<<<<< HEAD\n");
        if let Some(blob_oid) = current {
            content.extend_from_slice(self.database().load_blob(blob_oid)?.content());
        }
        content.extend_from_slice(b"=======\n");
        if let Some(blob_oid) = given {
            content.extend_from_slice(self.database().load_blob(blob_oid)?.content());
        }
        content.extend_from_slice(b">>>>>>>\n");

        let content = Bytes::from(content);
        self.workspace().write_file(filename, &content)?;

        self.database().store(Blob::new(content))
    }
}
