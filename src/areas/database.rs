use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::{ABBREV_ID_LENGTH, OBJECT_ID_LENGTH};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Append-only, content-addressed object store
///
/// Objects live under `objects/commits/<id>` and `objects/blobs/<id>`, one
/// zlib-compressed file per object, the full 40-hex id as filename. Storing
/// an object that already exists is a no-op; nothing is ever updated or
/// deleted.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

// TODO: cache commits loaded repeatedly during merge-base traversal
impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn commits_path(&self) -> PathBuf {
        self.path.join(ObjectType::Commit.dir_name())
    }

    pub fn blobs_path(&self) -> PathBuf {
        self.path.join(ObjectType::Blob.dir_name())
    }

    /// Persist an object under its content digest, unless already present
    pub fn store(&self, object: impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object.object_path()?);

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
        }

        Ok(object_id)
    }

    pub fn load_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let reader = self.open_object(ObjectType::Blob, object_id)?;
        Blob::deserialize(reader)
    }

    pub fn load_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let reader = self.open_object(ObjectType::Commit, object_id)?;
        Commit::deserialize(reader)
    }

    /// Load the slim form of a commit for graph traversal
    pub fn slim_commit(&self, object_id: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(self.load_commit(object_id)?.to_slim(object_id.clone()))
    }

    /// Enumerate every stored commit id, in lexicographic order
    pub fn list_commits(&self) -> anyhow::Result<Vec<ObjectId>> {
        let commits_path = self.commits_path();
        let mut object_ids = Vec::new();

        for entry in std::fs::read_dir(&commits_path).context(format!(
            "Unable to list commit directory {}",
            commits_path.display()
        ))? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();

            if let Ok(object_id) = ObjectId::try_parse(file_name) {
                object_ids.push(object_id);
            }
        }

        object_ids.sort();
        Ok(object_ids)
    }

    /// Resolve a possibly-abbreviated commit id to a stored full id
    ///
    /// Exactly 40 hex characters resolve to themselves when stored; exactly
    /// 6 hex characters are matched as a prefix against all stored commit
    /// ids (first match in lexicographic order wins). Any other length is
    /// unresolvable.
    pub fn resolve_commit_id(&self, token: &str) -> anyhow::Result<Option<ObjectId>> {
        match token.len() {
            OBJECT_ID_LENGTH => {
                let Ok(object_id) = ObjectId::try_parse(token.to_string()) else {
                    return Ok(None);
                };

                if self.commits_path().join(object_id.as_ref()).exists() {
                    Ok(Some(object_id))
                } else {
                    Ok(None)
                }
            }
            ABBREV_ID_LENGTH => Ok(self
                .list_commits()?
                .into_iter()
                .find(|object_id| object_id.as_ref().starts_with(token))),
            _ => Ok(None),
        }
    }

    fn open_object(
        &self,
        object_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self
            .path
            .join(object_type.dir_name())
            .join(object_id.as_ref());
        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let parsed_type = ObjectType::parse_object_type(&mut object_reader)?;
        anyhow::ensure!(
            parsed_type == object_type,
            "Object {} is not a {}",
            object_id,
            object_type
        );

        Ok(object_reader)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        // compress the object content
        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
