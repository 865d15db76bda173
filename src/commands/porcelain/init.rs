use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::errors::KitError;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            anyhow::bail!(KitError::AlreadyInitialized);
        }

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .kit/objects directory")?;

        fs::create_dir_all(self.database().commits_path())
            .context("Failed to create .kit/objects/commits directory")?;

        fs::create_dir_all(self.database().blobs_path())
            .context("Failed to create .kit/objects/blobs directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .kit/refs/heads directory")?;

        self.refs()
            .set_head(DEFAULT_BRANCH)
            .context("Failed to create initial HEAD reference")?;

        // every repository starts from the same root commit
        let root_oid = self.database().store(Commit::root())?;
        self.refs().update_branch(DEFAULT_BRANCH, &root_oid)?;

        let index = self.index();
        // create the index file if it does not exist
        if !index.path().exists() {
            fs::write(index.path(), b"").context("Failed to create .kit/index file")?;
        }
        drop(index);

        writeln!(
            self.writer(),
            "Initialized empty kit repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
