use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::errors::KitError;

impl Repository {
    /// Restore a file from the current commit
    pub fn checkout_file(&mut self, filename: &str) -> anyhow::Result<()> {
        let (_, current_commit) = self.current_commit()?;

        Migration::new(self).restore_file(&current_commit, filename)
    }

    /// Restore a file from the given (possibly abbreviated) commit id
    pub fn checkout_file_at(&mut self, commit_token: &str, filename: &str) -> anyhow::Result<()> {
        let (_, commit) = self.resolve_commit(commit_token)?;

        Migration::new(self).restore_file(&commit, filename)
    }

    /// Switch to another branch, reconciling the working tree
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(branch_name) {
            anyhow::bail!(KitError::NoSuchBranch);
        }
        if self.refs().current_branch()? == branch_name {
            anyhow::bail!(KitError::AlreadyOnBranch);
        }

        let (_, current_commit) = self.current_commit()?;
        let target_oid = self
            .refs()
            .read_branch(branch_name)?
            .ok_or_else(|| anyhow::anyhow!("branch {branch_name} does not point at a commit"))?;
        let target_commit = self.database().load_commit(&target_oid)?;

        let mut index = self.index();
        index.rehydrate()?;

        let migration = Migration::new(self);
        migration.check_untracked(&current_commit, &target_commit, &index)?;
        migration.apply(&current_commit, &target_commit)?;

        self.refs().set_head(branch_name)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
