//! User-facing failures
//!
//! Every command either succeeds or reports exactly one of these conditions.
//! They travel inside `anyhow::Error` so infrastructure failures (I/O, corrupt
//! objects) can keep their context chain, and callers that need to branch on the
//! condition use `downcast_ref::<Error>()`.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Not in an initialized twig directory.")]
    NoRepository,

    #[error("A twig version-control system already exists in the current directory.")]
    RepositoryExists,

    #[error("No commit with that id exists.")]
    NoSuchCommit,

    #[error("Commit id prefix {0} is ambiguous.")]
    AmbiguousId(String),

    #[error("Object {0} does not exist.")]
    ObjectNotFound(ObjectId),

    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("No changes added to the commit.")]
    NoChangesStaged,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("File does not exist.")]
    FileMissing,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    CannotDeleteCurrent,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict(Vec<PathBuf>),

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("Found no commit with that message.")]
    NoMatch,

    #[error("{0} is not a valid branch name.")]
    InvalidBranchName(String),
}
