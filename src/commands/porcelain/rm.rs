use crate::areas::repository::Repository;
use crate::errors::Error;
use tracing::debug;

impl Repository {
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(path);
        let staged = self.state().index.staged_addition(&path).is_some();
        let tracked = self.is_tracked(&path)?;

        if !staged && !tracked {
            anyhow::bail!(Error::NothingToRemove);
        }

        self.state_mut().index.unstage(&path);
        if tracked {
            self.workspace().remove_file(&path)?;
            self.state_mut().index.stage_removal(path.clone());
            debug!(path = %path.display(), "staged for removal");
        }

        Ok(())
    }
}
