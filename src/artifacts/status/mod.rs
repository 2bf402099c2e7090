//! Working tree status inspection
//!
//! Compares working-directory content hashes against the head commit's tree
//! and the staging index.
//!
//! - `file_change`: Per-path status categories
//! - `status_info`: Status computation for the `status` command

pub mod file_change;
pub mod status_info;
