use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use tracing::info;

impl Repository {
    /// Restore one file from `commit` (the head commit when absent). Nothing
    /// is staged.
    pub fn checkout_file(&mut self, commit: Option<&str>, path: &str) -> anyhow::Result<()> {
        let commit_oid = match commit {
            Some(prefix) => self.database().resolve_prefix(prefix)?,
            None => self.head_oid()?,
        };
        let commit = self.database().get_commit(&commit_oid)?;
        let path = self.workspace().relative_path(path);

        let blob_oid = commit.blob_at(&path).ok_or(Error::FileNotInCommit)?;
        let content = self.database().get_blob(blob_oid)?.into_content();

        self.workspace().write_file(&path, &content)
    }

    pub fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let (branch, target_oid) = self
            .state()
            .refs
            .find_branch(name)
            .ok_or(Error::NoSuchBranch)?;

        if self.state().refs.is_current_branch(&branch) {
            anyhow::bail!(Error::AlreadyOnBranch);
        }

        self.reconcile_workspace(&target_oid)?;

        let state = self.state_mut();
        state.index.clear();
        state.refs.set_head(branch.clone())?;
        info!(%branch, oid = %target_oid, "switched branch");

        Ok(())
    }

    /// Move the working directory from the head commit's snapshot to
    /// `target`'s, refusing before any write if an untracked file is in the way.
    pub fn reconcile_workspace(&self, target: &ObjectId) -> anyhow::Result<()> {
        let current_tree = self.head_commit()?.tree().clone();
        let target_commit = self.database().get_commit(target)?;

        let mut migration = Migration::new(self, current_tree);
        migration.plan_checkout(target_commit.tree())?;
        migration.apply_changes()
    }
}
