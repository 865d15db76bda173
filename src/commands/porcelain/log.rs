use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the history of the current commit, root last
    pub fn log(&mut self) -> anyhow::Result<()> {
        let (mut oid, mut commit) = self.current_commit()?;

        loop {
            writeln!(self.writer(), "{}\n", commit.display_log(&oid))?;

            match commit.parent().cloned() {
                Some(parent_oid) => {
                    commit = self.database().load_commit(&parent_oid)?;
                    oid = parent_oid;
                }
                None => break,
            }
        }

        Ok(())
    }

    /// Print every stored commit, in lexicographic id order
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        for oid in self.database().list_commits()? {
            let commit = self.database().load_commit(&oid)?;
            writeln!(self.writer(), "{}\n", commit.display_log(&oid))?;
        }

        Ok(())
    }
}
