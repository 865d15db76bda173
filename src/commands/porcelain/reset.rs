use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch to the given commit and reconcile the
    /// working tree
    pub fn reset(&mut self, commit_token: &str) -> anyhow::Result<()> {
        let (target_oid, target_commit) = self.resolve_commit(commit_token)?;
        let (_, current_commit) = self.current_commit()?;

        let mut index = self.index();
        index.rehydrate()?;

        let migration = Migration::new(self);
        migration.check_untracked(&current_commit, &target_commit, &index)?;
        migration.apply(&current_commit, &target_commit)?;

        let branch_name = self.refs().current_branch()?;
        self.refs().update_branch(&branch_name, &target_oid)?;

        index.clear();
        index.write_updates()?;

        Ok(())
    }
}
