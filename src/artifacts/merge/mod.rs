//! Merge algorithms
//!
//! - `bca_finder`: best common ancestor discovery over the commit graph
//! - `classification`: three-way per-file merge classification

pub mod bca_finder;
pub mod classification;
