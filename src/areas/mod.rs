//! Core repository components
//!
//! - `database`: Content-addressed store for blobs and commits
//! - `index`: Staged additions and removals
//! - `refs`: Branch table and HEAD
//! - `repository`: Coordination of the areas for the commands
//! - `staging`: Pending copies of staged file content
//! - `state`: The persisted record holding refs and index
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod staging;
pub mod state;
pub mod workspace;
