use crate::areas::repository::Repository;
use tracing::info;

impl Repository {
    /// Check out every file of the commit `prefix` resolves to and move the
    /// current branch there.
    pub fn reset(&mut self, prefix: &str) -> anyhow::Result<()> {
        let target = self.database().resolve_prefix(prefix)?;

        self.reconcile_workspace(&target)?;

        let state = self.state_mut();
        state.index.clear();
        state.refs.update_head(target.clone());
        info!(oid = %target, "reset current branch");

        Ok(())
    }
}
