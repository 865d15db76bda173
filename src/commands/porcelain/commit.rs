use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::KitError;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let message = message.trim();
        if message.is_empty() {
            anyhow::bail!(KitError::EmptyMessage);
        }

        let mut index = self.index();
        index.rehydrate()?;

        if index.is_empty() {
            anyhow::bail!(KitError::NothingToCommit);
        }

        let (head_oid, head_commit) = self.current_commit()?;
        let snapshot = index.apply_to(head_commit.file_map());

        let commit = Commit::new(message, Some(head_oid), snapshot);
        let commit_oid = self.database().store(commit)?;

        let branch_name = self.refs().current_branch()?;
        self.refs().update_branch(&branch_name, &commit_oid)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
