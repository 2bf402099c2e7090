//! A small, local version-control engine.
//!
//! Snapshots of a working directory are stored as content-addressed blobs and
//! commits, linked into a history, and reconciled back onto disk through
//! branch checkouts, resets and three-way merges.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
