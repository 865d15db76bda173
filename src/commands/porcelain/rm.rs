use crate::areas::repository::Repository;
use crate::errors::KitError;

impl Repository {
    pub fn rm(&mut self, filename: &str) -> anyhow::Result<()> {
        let (_, current_commit) = self.current_commit()?;

        let mut index = self.index();
        index.rehydrate()?;

        if index.is_staged_for_add(filename) {
            index.unstage_add(filename);
        } else if let Some(blob_oid) = current_commit.blob_id(filename) {
            index.stage_remove(filename, blob_oid.clone());
            self.workspace().delete_file(filename)?;
        } else {
            anyhow::bail!(KitError::NoReasonToRemove);
        }

        index.write_updates()?;

        Ok(())
    }
}
