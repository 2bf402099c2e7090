//! Data structures and algorithms
//!
//! - `branch`: Branch names
//! - `checkout`: Working-directory migrations and untracked-file detection
//! - `core`: Shared utilities (pager wrapper)
//! - `log`: Commit history traversal
//! - `merge`: Split-point discovery and three-way classification
//! - `objects`: Object types (blob, commit)
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
