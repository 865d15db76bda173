//! Working tree status inspection
//!
//! Compares the working directory against the staging index and the current
//! commit's snapshot.

pub mod report;
