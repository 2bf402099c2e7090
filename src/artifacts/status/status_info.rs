use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::CommitTree;
use crate::artifacts::status::file_change::{FileStatus, WorkspaceChange};
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub type FileSet = BTreeSet<PathBuf>;
pub type ChangeSet = BTreeMap<PathBuf, WorkspaceChange>;

/// Everything `status` reports, each set in path order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub staged_files: FileSet,
    pub removed_files: FileSet,
    pub workspace_changeset: ChangeSet,
    pub untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let head_tree = self.repository.head_commit()?.tree().clone();
        let index = &self.repository.state().index;

        let candidates = self
            .repository
            .workspace()
            .list_files(None)?
            .into_iter()
            .chain(head_tree.keys().cloned())
            .chain(index.additions().keys().cloned())
            .chain(index.removals().iter().cloned())
            .collect::<BTreeSet<_>>();

        let mut info = StatusInfo::default();
        for path in candidates {
            for status in self.file_status(&path, &head_tree)? {
                match status {
                    FileStatus::Unmodified => {}
                    FileStatus::StagedNew | FileStatus::StagedModified => {
                        info.staged_files.insert(path.clone());
                    }
                    FileStatus::StagedForRemoval => {
                        info.removed_files.insert(path.clone());
                    }
                    FileStatus::ModifiedNotStaged => {
                        info.workspace_changeset
                            .insert(path.clone(), WorkspaceChange::Modified);
                    }
                    FileStatus::DeletedNotStaged => {
                        info.workspace_changeset
                            .insert(path.clone(), WorkspaceChange::Deleted);
                    }
                    FileStatus::Untracked => {
                        info.untracked_files.insert(path.clone());
                    }
                }
            }
        }

        Ok(info)
    }

    /// Every status that applies to `path`, empty when nothing knows about it.
    ///
    /// A path can be in the index and drift in the working directory at the
    /// same time, so the index status (if any) comes first, then the drift.
    pub fn file_status(
        &self,
        path: &Path,
        head_tree: &CommitTree,
    ) -> anyhow::Result<Vec<FileStatus>> {
        let index = &self.repository.state().index;
        let on_disk = self.repository.workspace().is_file(path);

        if index.is_staged_for_removal(path) {
            // removed, then re-created behind our back
            return Ok(std::iter::once(FileStatus::StagedForRemoval)
                .chain(on_disk.then_some(FileStatus::Untracked))
                .collect());
        }

        let mut statuses = Vec::new();
        if index.staged_addition(path).is_some() {
            statuses.push(if head_tree.contains_key(path) {
                FileStatus::StagedModified
            } else {
                FileStatus::StagedNew
            });
        } else if !head_tree.contains_key(path) {
            return Ok(on_disk.then_some(FileStatus::Untracked).into_iter().collect());
        }

        match self.check_against_workspace(path, head_tree)? {
            Some(WorkspaceChange::Modified) => statuses.push(FileStatus::ModifiedNotStaged),
            Some(WorkspaceChange::Deleted) => statuses.push(FileStatus::DeletedNotStaged),
            None if statuses.is_empty() => statuses.push(FileStatus::Unmodified),
            None => {}
        }

        Ok(statuses)
    }

    // Drift of a tracked or staged file: compared with its staged version when
    // there is one, with the head version otherwise.
    fn check_against_workspace(
        &self,
        path: &Path,
        head_tree: &CommitTree,
    ) -> anyhow::Result<Option<WorkspaceChange>> {
        let index = &self.repository.state().index;
        if index.is_staged_for_removal(path) {
            return Ok(None);
        }

        let expected = index.staged_addition(path).or_else(|| head_tree.get(path));
        let Some(expected) = expected else {
            return Ok(None);
        };

        Ok(match self.repository.workspace().hash_file(path)? {
            None => Some(WorkspaceChange::Deleted),
            Some(actual) if &actual != expected => Some(WorkspaceChange::Modified),
            Some(_) => None,
        })
    }
}
