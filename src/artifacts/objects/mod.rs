//! Stored object types and operations
//!
//! The object database stores two kinds of immutable, content-addressed
//! records, each identified by a SHA-1 hash:
//!
//! - **Blob**: raw file content
//! - **Commit**: a complete tracked-file snapshot with metadata and parent
//!   linkage
//!
//! All objects implement serialization/deserialization for the on-disk
//! framing `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the accepted abbreviated commit id form
pub const ABBREV_ID_LENGTH: usize = 6;
