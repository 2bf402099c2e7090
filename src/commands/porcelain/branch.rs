use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::Error;
use tracing::debug;

impl Repository {
    /// Create `name` at the head commit without switching to it
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string())?;
        let head_oid = self.head_oid()?;

        self.state_mut()
            .refs
            .create_branch(branch_name.clone(), head_oid.clone())?;
        debug!(branch = %branch_name, oid = %head_oid, "created branch");

        Ok(())
    }

    /// Delete the branch pointer only; its commits stay in the store.
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(name.to_string()).map_err(|_| Error::NoSuchBranch)?;

        self.state_mut().refs.delete_branch(&branch_name)?;
        debug!(branch = %branch_name, "deleted branch");

        Ok(())
    }
}
