//! Command implementations
//!
//! User-facing commands are implemented as methods on `Repository`, one
//! file per command family under `porcelain`.

pub mod porcelain;
