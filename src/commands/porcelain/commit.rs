use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, CommitTree};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use tracing::info;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            anyhow::bail!(Error::EmptyMessage);
        }

        let head_oid = self.head_oid()?;
        let tree = self.drain_index(self.head_commit()?.tree().clone(), false)?;

        self.write_commit(vec![head_oid], tree, message)
    }

    /// Turn the staged content into blobs and overlay the index on `base`.
    /// The index is left empty.
    pub fn drain_index(&mut self, base: CommitTree, allow_empty: bool) -> anyhow::Result<CommitTree> {
        let index = &self.state().index;
        if index.is_empty() && !allow_empty {
            anyhow::bail!(Error::NoChangesStaged);
        }

        for (path, oid) in index.additions() {
            let content = self.staging().read_pending(path)?;
            let stored = self.database().put_blob(content)?;

            if &stored != oid {
                anyhow::bail!(
                    "Staged content of {} changed since it was added",
                    path.display()
                );
            }
        }

        let tree = index.apply_to(base);
        self.state_mut().index.clear();

        Ok(tree)
    }

    /// Store a commit of `tree` and move the current branch onto it
    pub fn write_commit(
        &mut self,
        parents: Vec<ObjectId>,
        tree: CommitTree,
        message: &str,
    ) -> anyhow::Result<ObjectId> {
        if message.trim().is_empty() {
            anyhow::bail!(Error::EmptyMessage);
        }

        let commit = Commit::new(
            parents,
            tree,
            Commit::timestamp_from_env(),
            message.to_string(),
        );
        let oid = self.database().put_commit(&commit)?;
        self.state_mut().refs.update_head(oid.clone());

        info!(%oid, branch = %self.state().refs.head(), files = commit.tree().len(), "committed");

        Ok(oid)
    }
}
