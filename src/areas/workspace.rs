use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::path::Path;

const IGNORED_NAMES: [&str; 1] = [".kit"];

/// Working directory file operations
///
/// The working tree is flat: only plain files at the repository root are
/// tracked. The repository metadata directory is ignored.
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path.join(filename).is_file()
    }

    pub fn read_file(&self, filename: &str) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(filename);

        let content = std::fs::read(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))?;

        Ok(content.into())
    }

    pub fn write_file(&self, filename: &str, content: &[u8]) -> anyhow::Result<()> {
        let file_path = self.path.join(filename);

        std::fs::write(&file_path, content)
            .context(format!("Unable to write file {}", file_path.display()))
    }

    /// Delete a working-tree file; deleting a missing file is a no-op
    pub fn delete_file(&self, filename: &str) -> anyhow::Result<()> {
        let file_path = self.path.join(filename);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .context(format!("Unable to delete file {}", file_path.display()))?;
        }

        Ok(())
    }

    /// Read a working-tree file as a blob
    pub fn parse_blob(&self, filename: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(filename)?))
    }

    /// List the plain files in the working tree, in lexicographic order
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&self.path)
            .context(format!("Unable to list directory {}", self.path.display()))?
        {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();

            if entry.path().is_file() && !IGNORED_NAMES.contains(&file_name.as_str()) {
                files.push(file_name);
            }
        }

        files.sort();
        Ok(files)
    }
}
