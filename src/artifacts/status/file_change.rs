use colored::Colorize;

/// Where a single path stands relative to the head commit, the staging index
/// and the working directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileStatus {
    Unmodified,
    StagedNew,
    StagedModified,
    StagedForRemoval,
    ModifiedNotStaged,
    DeletedNotStaged,
    Untracked,
}

/// Working-directory drift of a tracked or staged file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChange {
    Modified,
    Deleted,
}

impl From<&WorkspaceChange> for &str {
    fn from(change: &WorkspaceChange) -> Self {
        match change {
            WorkspaceChange::Modified => "modified",
            WorkspaceChange::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for WorkspaceChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = self.into();
        write!(f, "({})", label.red())
    }
}
