use crate::areas::repository::Repository;
use crate::errors::KitError;
use std::io::Write;

impl Repository {
    /// Print the id of every commit whose message matches exactly
    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.database().list_commits()? {
            let commit = self.database().load_commit(&oid)?;

            if commit.message() == message {
                writeln!(self.writer(), "{oid}")?;
                found = true;
            }
        }

        if !found {
            anyhow::bail!(KitError::NoMatchingCommit);
        }

        Ok(())
    }
}
