use crate::areas::database::CommitCache;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::merge::resolution::{MergeAction, classify, conflict_content};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// What a merge did to the current branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already contained in the current one
    UpToDate,
    /// The current branch moved forward to the given tip
    FastForward(ObjectId),
    /// A two-parent commit was written
    Merged {
        commit: ObjectId,
        conflicts: Vec<PathBuf>,
    },
}

impl Repository {
    pub fn merge(&mut self, name: &str) -> anyhow::Result<MergeOutcome> {
        if !self.state().index.is_empty() {
            anyhow::bail!(Error::UncommittedChanges);
        }
        let (given_branch, given_oid) = self
            .state()
            .refs
            .find_branch(name)
            .ok_or(Error::NoSuchBranch)?;
        if self.state().refs.is_current_branch(&given_branch) {
            anyhow::bail!(Error::SelfMerge);
        }

        let current_branch = self.state().refs.head().clone();
        let current_oid = self.head_oid()?;

        let split_oid = {
            let commit_cache = CommitCache::new();
            let database = self.database();
            let finder =
                SplitPointFinder::new(|oid| commit_cache.get_or_load_slim_commit(database, oid));

            finder.find_split_point(&current_oid, &given_oid)?
        };
        debug!(split = %split_oid, current = %current_oid, given = %given_oid, "found split point");

        if split_oid == given_oid {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(MergeOutcome::UpToDate);
        }

        if split_oid == current_oid {
            self.reconcile_workspace(&given_oid)?;
            self.state_mut().refs.update_head(given_oid.clone());
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            info!(branch = %current_branch, oid = %given_oid, "fast-forwarded");

            return Ok(MergeOutcome::FastForward(given_oid));
        }

        let split = self.database().get_commit(&split_oid)?;
        let current = self.database().get_commit(&current_oid)?;
        let given = self.database().get_commit(&given_oid)?;

        let paths = split
            .tree()
            .keys()
            .chain(current.tree().keys())
            .chain(given.tree().keys())
            .collect::<BTreeSet<_>>();

        // `Some` stages the blob, `None` stages a removal
        let mut staged = Vec::<(PathBuf, Option<ObjectId>)>::new();
        let mut conflicts = Vec::new();
        {
            let mut migration = Migration::new(self, current.tree().clone());

            for path in paths {
                let action = classify(
                    split.blob_at(path),
                    current.blob_at(path),
                    given.blob_at(path),
                );

                match action {
                    MergeAction::Keep => {}
                    MergeAction::TakeGiven(oid) => {
                        migration.plan_write(path, &oid)?;
                        staged.push((path.clone(), Some(oid)));
                    }
                    MergeAction::Remove => {
                        migration.plan_delete(path);
                        staged.push((path.clone(), None));
                    }
                    MergeAction::Conflict { current, given } => {
                        let content = conflict_content(
                            &self.blob_content(current.as_ref())?,
                            &self.blob_content(given.as_ref())?,
                        );
                        let oid = self.database().put_blob(content)?;

                        migration.plan_write(path, &oid)?;
                        staged.push((path.clone(), Some(oid)));
                        conflicts.push(path.clone());
                    }
                }
            }

            migration.apply_changes()?;
        }

        for (path, oid) in staged {
            match oid {
                Some(oid) => {
                    let content = self.database().get_blob(&oid)?.into_content();
                    self.stage_add(path, content)?;
                }
                None => self.state_mut().index.stage_removal(path),
            }
        }

        let tree = self.drain_index(current.tree().clone(), true)?;
        let message = format!("Merged {} into {}.", given_branch, current_branch);
        let commit = self.write_commit(vec![current_oid, given_oid], tree, &message)?;

        if !conflicts.is_empty() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }
        info!(%commit, conflicts = conflicts.len(), "merged {given_branch} into {current_branch}");

        Ok(MergeOutcome::Merged { commit, conflicts })
    }

    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Bytes> {
        match oid {
            Some(oid) => Ok(self.database().get_blob(oid)?.into_content()),
            None => Ok(Bytes::new()),
        }
    }
}
