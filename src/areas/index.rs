//! Staging index
//!
//! The index records the pending changes since the last commit: filenames
//! staged for addition (with the blob id of the staged content) and
//! filenames staged for removal (with the blob id they had when removed,
//! kept only for status reporting). It persists across invocations and is
//! read, modified, and written back atomically per command.
//!
//! ## File Format
//!
//! One entry per line, additions first, each map sorted by filename:
//!
//! ```text
//! add <blob-sha> <filename>
//! rm <blob-sha> <filename>
//! ```

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

/// Staging index (pending additions and removals)
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.kit/index`)
    path: Box<Path>,
    /// Pending additions: filename -> staged blob id
    to_add: BTreeMap<String, ObjectId>,
    /// Pending removals: filename -> blob id at time of removal
    to_remove: BTreeMap<String, ObjectId>,
}

impl Index {
    /// Create a new empty index
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            to_add: BTreeMap::new(),
            to_remove: BTreeMap::new(),
        }
    }

    /// Get the path to the index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index from disk
    ///
    /// A missing or empty index file yields an empty index.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.clear();

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .context(format!("Unable to read index file {}", self.path.display()))?;

        for line in content.lines().filter(|line| !line.is_empty()) {
            let (tag, entry) = line
                .split_once(' ')
                .context(format!("Corrupt index entry: {line}"))?;
            let (blob_oid, filename) = entry
                .split_once(' ')
                .context(format!("Corrupt index entry: {line}"))?;
            let blob_oid = ObjectId::try_parse(blob_oid.to_string())?;

            match tag {
                "add" => self.to_add.insert(filename.to_string(), blob_oid),
                "rm" => self.to_remove.insert(filename.to_string(), blob_oid),
                _ => anyhow::bail!("Corrupt index entry: {line}"),
            };
        }

        Ok(())
    }

    /// Write the index back to disk, replacing the previous contents
    pub fn write_updates(&self) -> anyhow::Result<()> {
        let mut lines = Vec::with_capacity(self.to_add.len() + self.to_remove.len());

        for (filename, blob_oid) in &self.to_add {
            lines.push(format!("add {} {}", blob_oid.as_ref(), filename));
        }
        for (filename, blob_oid) in &self.to_remove {
            lines.push(format!("rm {} {}", blob_oid.as_ref(), filename));
        }

        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        std::fs::write(&self.path, content)
            .context(format!("Unable to write index file {}", self.path.display()))
    }

    /// Record an intended addition, overwriting any prior pending addition
    /// for the same filename
    pub fn stage_add(&mut self, filename: &str, blob_oid: ObjectId) {
        self.to_add.insert(filename.to_string(), blob_oid);
    }

    /// Record an intended removal
    pub fn stage_remove(&mut self, filename: &str, blob_oid: ObjectId) {
        self.to_remove.insert(filename.to_string(), blob_oid);
    }

    /// Clear a single pending addition
    pub fn unstage_add(&mut self, filename: &str) {
        self.to_add.remove(filename);
    }

    /// Clear a single pending removal
    pub fn unstage_remove(&mut self, filename: &str) {
        self.to_remove.remove(filename);
    }

    pub fn is_staged_for_add(&self, filename: &str) -> bool {
        self.to_add.contains_key(filename)
    }

    /// Blob id staged for addition for the given filename, if any
    pub fn staged_blob_id(&self, filename: &str) -> Option<&ObjectId> {
        self.to_add.get(filename)
    }

    pub fn to_add(&self) -> &BTreeMap<String, ObjectId> {
        &self.to_add
    }

    pub fn to_remove(&self) -> &BTreeMap<String, ObjectId> {
        &self.to_remove
    }

    /// Whether both maps are empty (gate for `commit` and `merge`)
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Empty both maps (called after a successful commit or merge)
    pub fn clear(&mut self) {
        self.to_add.clear();
        self.to_remove.clear();
    }

    /// Overlay the pending changes on a commit snapshot
    ///
    /// Returns the parent's file map with every pending addition overwritten
    /// in and every pending removal deleted. This is exactly the snapshot
    /// the next commit records.
    pub fn apply_to(
        &self,
        file_map: &BTreeMap<String, ObjectId>,
    ) -> BTreeMap<String, ObjectId> {
        let mut snapshot = file_map.clone();

        for (filename, blob_oid) in &self.to_add {
            snapshot.insert(filename.clone(), blob_oid.clone());
        }
        for filename in self.to_remove.keys() {
            snapshot.remove(filename);
        }

        snapshot
    }
}
