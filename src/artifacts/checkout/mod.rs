//! Working-directory reconciliation
//!
//! Branch checkouts, resets and merges all rewrite the working directory to
//! match a stored snapshot. The `migration` module plans those rewrites and
//! refuses to clobber untracked files before any byte hits the disk.

pub mod migration;
