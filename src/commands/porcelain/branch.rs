use crate::areas::repository::Repository;
use crate::errors::KitError;

impl Repository {
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if self.refs().branch_exists(branch_name) {
            anyhow::bail!(KitError::BranchExists);
        }

        let (head_oid, _) = self.current_commit()?;
        self.refs().create_branch(branch_name, &head_oid)
    }

    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.refs().branch_exists(branch_name) {
            anyhow::bail!(KitError::BranchNotFound);
        }
        if self.refs().current_branch()? == branch_name {
            anyhow::bail!(KitError::CannotRemoveCurrent);
        }

        self.refs().delete_branch(branch_name)
    }
}
