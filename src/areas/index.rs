//! Staging index
//!
//! Records what the next commit will change relative to its parent:
//!
//! - `additions`: path to the blob id of the content staged for it
//! - `removals`: paths the next commit stops tracking
//!
//! The two sets never share a path. Staged content itself lives in the pending
//! area (see `staging`) until a commit turns it into blobs.

use crate::artifacts::objects::commit::CommitTree;
use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    additions: BTreeMap<PathBuf, ObjectId>,
    removals: BTreeSet<PathBuf>,
}

impl Index {
    pub fn additions(&self) -> &BTreeMap<PathBuf, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeSet<PathBuf> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn staged_addition(&self, path: &Path) -> Option<&ObjectId> {
        self.additions.get(path)
    }

    pub fn is_staged_for_removal(&self, path: &Path) -> bool {
        self.removals.contains(path)
    }

    /// Stage `oid` for `path`, cancelling a pending removal of it
    pub fn stage_addition(&mut self, path: PathBuf, oid: ObjectId) {
        self.discard_conflicts(&path);
        self.removals.remove(&path);
        self.additions.insert(path, oid);
    }

    /// Unstage additions that cannot coexist with a file at `path`: a file at
    /// one of its parent directories, or anything below `path` itself.
    fn discard_conflicts(&mut self, path: &Path) {
        let conflicts = self
            .additions
            .keys()
            .filter(|staged| {
                staged.as_path() != path && (path.starts_with(staged) || staged.starts_with(path))
            })
            .cloned()
            .collect::<Vec<_>>();

        for conflict in &conflicts {
            self.additions.remove(conflict);
        }
    }

    /// Drop whatever is staged for `path`, addition or removal
    pub fn unstage(&mut self, path: &Path) -> Option<ObjectId> {
        self.removals.remove(path);
        self.additions.remove(path)
    }

    pub fn stage_removal(&mut self, path: PathBuf) {
        self.additions.remove(&path);
        self.removals.insert(path);
    }

    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    /// Overlay the staged changes on `tree`: additions win, removals drop.
    pub fn apply_to(&self, mut tree: CommitTree) -> CommitTree {
        for (path, oid) in &self.additions {
            tree.insert(path.clone(), oid.clone());
        }
        for path in &self.removals {
            tree.remove(path);
        }

        tree
    }
}
