//! Command implementations
//!
//! - `porcelain`: The commands the `twig` binary exposes (add, commit, log, merge, ...)

pub mod porcelain;
