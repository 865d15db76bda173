use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::KitError;

impl Repository {
    pub fn add(&mut self, filename: &str) -> anyhow::Result<()> {
        if !self.workspace().exists(filename) {
            anyhow::bail!(KitError::FileNotFound);
        }

        let blob = self.workspace().parse_blob(filename)?;
        let blob_oid = blob.object_id()?;

        let (_, current_commit) = self.current_commit()?;

        let mut index = self.index();
        index.rehydrate()?;

        if current_commit.blob_id(filename) == Some(&blob_oid) {
            // content matches the current commit, so nothing is staged; a
            // pending removal is cancelled though
            index.unstage_remove(filename);
        } else {
            self.database().store(blob)?;
            index.stage_add(filename, blob_oid);
            index.unstage_remove(filename);
        }

        index.write_updates()?;

        Ok(())
    }
}
