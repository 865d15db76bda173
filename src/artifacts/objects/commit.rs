//! Commit object
//!
//! A commit records a complete snapshot of the tracked files plus metadata:
//! timestamp, message, and parent linkage. The file map is total, so checking
//! out a commit never requires walking its ancestors. Merge commits carry a
//! second parent pointing at the tip of the merged-in branch.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>            (absent for the root commit)
//! second-parent <parent-sha>     (merge commits only)
//! date <unix-seconds> <timezone>
//! file <blob-sha> <filename>     (one per tracked file, sorted)
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// Message carried by the root commit of every repository
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Slim representation of a commit
///
/// Contains only what the merge-base search needs: identity, parent linkage,
/// and the timestamp used to order the traversal.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// First and (for merge commits) second parent
    pub parents: Vec<ObjectId>,
    /// Commit timestamp
    pub timestamp: DateTime<FixedOffset>,
}

/// Commit object
///
/// Immutable once created. The file map is the complete tracked-file
/// snapshot, mapping filename to blob id.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Primary parent (None only for the root commit)
    parent: Option<ObjectId>,
    /// Second parent, set only on merge commits
    second_parent: Option<ObjectId>,
    /// Commit timestamp
    timestamp: DateTime<FixedOffset>,
    /// Complete snapshot: filename -> blob id
    file_map: BTreeMap<String, ObjectId>,
    /// Commit message
    message: String,
}

impl Commit {
    /// Create a new commit stamped with the current time
    pub fn new(
        message: impl Into<String>,
        parent: Option<ObjectId>,
        file_map: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            parent,
            second_parent: None,
            timestamp: chrono::Local::now().fixed_offset(),
            file_map,
            message: message.into(),
        }
    }

    /// Create a merge commit with both parents set
    pub fn new_merge(
        message: impl Into<String>,
        parent: ObjectId,
        second_parent: ObjectId,
        file_map: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            parent: Some(parent),
            second_parent: Some(second_parent),
            timestamp: chrono::Local::now().fixed_offset(),
            file_map,
            message: message.into(),
        }
    }

    /// The root commit every repository starts from
    ///
    /// Fixed epoch timestamp and message, empty snapshot, no parent. Its id
    /// is therefore identical across repositories.
    pub fn root() -> Self {
        Commit {
            parent: None,
            second_parent: None,
            timestamp: DateTime::<Utc>::UNIX_EPOCH.fixed_offset(),
            file_map: BTreeMap::new(),
            message: ROOT_COMMIT_MESSAGE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn file_map(&self) -> &BTreeMap<String, ObjectId> {
        &self.file_map
    }

    /// Whether the snapshot tracks the given filename
    pub fn tracks(&self, filename: &str) -> bool {
        self.file_map.contains_key(filename)
    }

    /// Blob id recorded for the given filename, if tracked
    pub fn blob_id(&self, filename: &str) -> Option<&ObjectId> {
        self.file_map.get(filename)
    }

    /// Build this commit's slim form for graph traversal
    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self
                .parent
                .iter()
                .chain(self.second_parent.iter())
                .cloned()
                .collect(),
            timestamp: self.timestamp,
        }
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    /// Format the commit as a history block
    ///
    /// The block is what `log` and `global-log` print per commit: a `===`
    /// separator, the full id, the merge parents (short form) when present,
    /// the readable date, and the message.
    pub fn display_log(&self, oid: &ObjectId) -> String {
        let mut lines = vec!["===".to_string(), format!("commit {}", oid)];

        if let (Some(parent), Some(second_parent)) = (&self.parent, &self.second_parent) {
            lines.push(format!(
                "Merge: {} {}",
                parent.to_short_oid(),
                second_parent.to_short_oid()
            ));
        }

        lines.push(format!("Date: {}", self.readable_timestamp()));
        lines.push(self.message.clone());

        lines.join("\n")
    }
}

fn parse_timestamp(seconds: i64, offset: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    anyhow::ensure!(
        offset.len() == 5,
        "Invalid commit timezone offset: {offset}"
    );

    let sign = match &offset[..1] {
        "+" => 1,
        "-" => -1,
        _ => anyhow::bail!("Invalid commit timezone offset: {offset}"),
    };
    let hours: i32 = offset[1..3]
        .parse()
        .context("Invalid commit timezone hours")?;
    let minutes: i32 = offset[3..5]
        .parse()
        .context("Invalid commit timezone minutes")?;

    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .context("Commit timezone offset out of range")?;
    let timestamp =
        DateTime::from_timestamp(seconds, 0).context("Commit timestamp out of range")?;

    Ok(timestamp.with_timezone(&offset))
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        if let Some(parent) = &self.parent {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        if let Some(second_parent) = &self.second_parent {
            object_content.push(format!("second-parent {}", second_parent.as_ref()));
        }
        object_content.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (filename, blob_oid) in &self.file_map {
            object_content.push(format!("file {} {}", blob_oid.as_ref(), filename));
        }
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), object_content.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(object_content.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        let mut lines = content.lines().peekable();

        let mut parent = None;
        if let Some(oid) = lines.peek().and_then(|line| line.strip_prefix("parent ")) {
            parent = Some(ObjectId::try_parse(oid.to_string())?);
            lines.next();
        }

        let mut second_parent = None;
        if let Some(oid) = lines
            .peek()
            .and_then(|line| line.strip_prefix("second-parent "))
        {
            second_parent = Some(ObjectId::try_parse(oid.to_string())?);
            lines.next();
        }

        let date_line = lines
            .next()
            .context("Invalid commit object: missing date line")?;
        let date_line = date_line
            .strip_prefix("date ")
            .context("Invalid commit object: invalid date line")?;
        let (seconds, offset) = date_line
            .split_once(' ')
            .context("Invalid commit object: invalid date line")?;
        let timestamp = parse_timestamp(
            seconds
                .parse()
                .context("Invalid commit object: invalid timestamp")?,
            offset,
        )?;

        let mut file_map = BTreeMap::new();
        while let Some(entry) = lines.peek().and_then(|line| line.strip_prefix("file ")) {
            let (blob_oid, filename) = entry
                .split_once(' ')
                .context("Invalid commit object: invalid file entry")?;
            file_map.insert(
                filename.to_string(),
                ObjectId::try_parse(blob_oid.to_string())?,
            );
            lines.next();
        }

        // skip the empty line separating headers from the message
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");

        Ok(Commit {
            parent,
            second_parent,
            timestamp,
            file_map,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        if let Some(second_parent) = &self.second_parent {
            lines.push(format!("second-parent {}", second_parent.as_ref()));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (filename, blob_oid) in &self.file_map {
            lines.push(format!("file {} {}", blob_oid.as_ref(), filename));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
