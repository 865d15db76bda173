//! Blob object
//!
//! Blobs store raw file content. Identity is purely a function of the bytes:
//! two files with identical content collapse to a single stored blob, no
//! matter what they are named in the working tree.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

/// Blob object representing file content
#[derive(Debug, Clone, new)]
pub struct Blob {
    /// Raw file content
    content: Bytes,
}

impl Blob {
    /// Get the raw file content
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), self.content.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(&self.content)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_content_produces_identical_ids() {
        let first = Blob::new(Bytes::from_static(b"hello"));
        let second = Blob::new(Bytes::from_static(b"hello"));

        assert_eq!(
            first.object_id().expect("oid"),
            second.object_id().expect("oid")
        );
    }

    #[test]
    fn test_different_content_produces_different_ids() {
        let first = Blob::new(Bytes::from_static(b"hello"));
        let second = Blob::new(Bytes::from_static(b"world"));

        assert_ne!(
            first.object_id().expect("oid"),
            second.object_id().expect("oid")
        );
    }

    #[test]
    fn test_round_trips_through_serialization() {
        use std::io::Cursor;

        let blob = Blob::new(Bytes::from_static(b"some bytes\nwith lines\n"));
        let serialized = blob.serialize().expect("serialize");

        let mut reader = Cursor::new(serialized);
        let object_type = ObjectType::parse_object_type(&mut reader).expect("header");
        assert_eq!(object_type, ObjectType::Blob);

        let parsed = Blob::deserialize(reader).expect("deserialize");
        assert_eq!(parsed.content(), blob.content());
    }
}
