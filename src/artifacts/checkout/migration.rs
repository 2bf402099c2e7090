//! Working-directory migration and untracked-file detection
//!
//! Moving the working directory from one snapshot to another (branch
//! checkout, reset, fast-forward, merge) goes through a `Migration`:
//!
//! 1. Plan every write and deletion against the currently tracked tree
//! 2. Detect untracked files the plan would clobber
//! 3. Apply the plan only when no conflict was found
//!
//! ## Untracked files
//!
//! A file is untracked when it exists on disk, the current commit does not
//! track it and it is not staged for addition. Overwriting one with different
//! content, or replacing a directory that holds one, is refused. Nothing is
//! written before the whole plan has been validated.

use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::CommitTree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Type of file system action required for a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActionType {
    /// Create new file
    Add,
    /// Delete file
    Delete,
    /// Modify existing file
    Modify,
}

/// Set of planned actions grouped by type
pub type ActionsSet = BTreeMap<ActionType, Vec<(PathBuf, Option<ObjectId>)>>;

pub struct Migration<'r> {
    repository: &'r Repository,
    /// Files tracked by the commit the working directory currently reflects
    current_tree: CommitTree,
    actions: ActionsSet,
    /// Untracked paths the plan would clobber
    conflicts: BTreeSet<PathBuf>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current_tree: CommitTree) -> Self {
        Self {
            repository,
            current_tree,
            actions: BTreeMap::new(),
            conflicts: BTreeSet::new(),
        }
    }

    pub fn actions(&self) -> &ActionsSet {
        &self.actions
    }

    pub fn conflicts(&self) -> &BTreeSet<PathBuf> {
        &self.conflicts
    }

    /// Plan the move from the current tree to `target`: tracked files missing
    /// from `target` are deleted, every file of `target` is written.
    pub fn plan_checkout(&mut self, target: &CommitTree) -> anyhow::Result<()> {
        let stale = self
            .current_tree
            .keys()
            .filter(|path| !target.contains_key(*path))
            .cloned()
            .collect::<Vec<_>>();

        for path in stale {
            self.plan_delete(&path);
        }
        for (path, oid) in target {
            self.plan_write(path, oid)?;
        }

        Ok(())
    }

    /// Plan writing blob `oid` at `path`, unless the file already holds it.
    pub fn plan_write(&mut self, path: &Path, oid: &ObjectId) -> anyhow::Result<()> {
        let workspace = self.repository.workspace();

        if workspace.hash_file(path)?.as_ref() == Some(oid) {
            return Ok(());
        }

        self.check_untracked(path)?;

        let action = if workspace.is_file(path) {
            ActionType::Modify
        } else {
            ActionType::Add
        };
        self.actions
            .entry(action)
            .or_default()
            .push((path.to_path_buf(), Some(oid.clone())));

        Ok(())
    }

    /// Plan deleting a tracked file
    pub fn plan_delete(&mut self, path: &Path) {
        if !self.repository.workspace().is_file(path) {
            return;
        }

        self.actions
            .entry(ActionType::Delete)
            .or_default()
            .push((path.to_path_buf(), None));
    }

    /// Fails with the untracked paths in the way, if any
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.conflicts.is_empty() {
            anyhow::bail!(Error::UntrackedFileConflict(
                self.conflicts.iter().cloned().collect()
            ));
        }

        Ok(())
    }

    pub fn apply_changes(&self) -> anyhow::Result<()> {
        self.validate()?;

        debug!(
            deletions = self.count(ActionType::Delete),
            writes = self.count(ActionType::Add) + self.count(ActionType::Modify),
            "applying migration"
        );
        self.repository.workspace().apply_migration(self)
    }

    pub fn load_blob_data(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        Ok(self.repository.database().get_blob(object_id)?.into_content())
    }

    fn count(&self, action: ActionType) -> usize {
        self.actions.get(&action).map_or(0, Vec::len)
    }

    fn is_untracked(&self, path: &Path) -> bool {
        !self.current_tree.contains_key(path)
            && self
                .repository
                .state()
                .index
                .staged_addition(path)
                .is_none()
    }

    fn check_untracked(&mut self, path: &Path) -> anyhow::Result<()> {
        let workspace = self.repository.workspace();

        // the file itself
        if workspace.is_file(path) && self.is_untracked(path) {
            self.conflicts.insert(path.to_path_buf());
        }

        // a directory holding untracked files where the file goes
        if workspace.is_directory(path) {
            for nested in workspace.list_files(Some(path))? {
                if self.is_untracked(&nested) {
                    self.conflicts.insert(nested);
                }
            }
        }

        // an untracked file where one of its directories goes
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if workspace.is_file(ancestor) && self.is_untracked(ancestor) {
                self.conflicts.insert(ancestor.to_path_buf());
            }
        }

        Ok(())
    }
}
