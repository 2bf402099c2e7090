//! Branch table and HEAD
//!
//! Branches are plain names mapped to commit ids. HEAD always names one of
//! them; there is no detached state. The table is part of the persisted
//! repository state and is only written at the end of a successful command.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refs {
    head: BranchName,
    branches: BTreeMap<BranchName, ObjectId>,
}

impl Refs {
    /// A table holding only the default branch, pointing at `root`
    pub fn new(root: ObjectId) -> Self {
        let head = BranchName::default_branch();
        Refs {
            branches: BTreeMap::from([(head.clone(), root)]),
            head,
        }
    }

    pub fn head(&self) -> &BranchName {
        &self.head
    }

    /// Commit the current branch points at
    pub fn head_commit(&self) -> anyhow::Result<&ObjectId> {
        self.branches
            .get(&self.head)
            .ok_or_else(|| anyhow::anyhow!("HEAD names missing branch {}", self.head))
    }

    pub fn read_branch(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    /// Look a branch up by its raw name; invalid names simply do not exist.
    pub fn find_branch(&self, name: &str) -> Option<(BranchName, ObjectId)> {
        let name = BranchName::try_parse(name.to_string()).ok()?;
        let oid = self.branches.get(&name)?.clone();

        Some((name, oid))
    }

    pub fn is_current_branch(&self, name: &BranchName) -> bool {
        &self.head == name
    }

    /// Move the current branch to `oid`
    pub fn update_head(&mut self, oid: ObjectId) {
        self.branches.insert(self.head.clone(), oid);
    }

    pub fn set_head(&mut self, name: BranchName) -> anyhow::Result<()> {
        if !self.branches.contains_key(&name) {
            anyhow::bail!(Error::NoSuchBranch);
        }
        self.head = name;

        Ok(())
    }

    pub fn create_branch(&mut self, name: BranchName, oid: ObjectId) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            anyhow::bail!(Error::BranchExists);
        }
        self.branches.insert(name, oid);

        Ok(())
    }

    pub fn delete_branch(&mut self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if !self.branches.contains_key(name) {
            anyhow::bail!(Error::NoSuchBranch);
        }
        if self.is_current_branch(name) {
            anyhow::bail!(Error::CannotDeleteCurrent);
        }

        self.branches
            .remove(name)
            .ok_or_else(|| Error::NoSuchBranch.into())
    }

    /// Branches in name order
    pub fn list_branches(&self) -> impl Iterator<Item = (&BranchName, &ObjectId)> {
        self.branches.iter()
    }
}
