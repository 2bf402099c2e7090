use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::Error;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tracing::debug;

impl Repository {
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let path = self.workspace().relative_path(path);

        if !self.workspace().is_file(&path) {
            anyhow::bail!(Error::FileMissing);
        }
        let content = self.workspace().read_file(&path)?;

        self.stage_add(path, content)
    }

    /// Stage `content` for `path`, or unstage it when the head commit already
    /// holds exactly that content.
    pub fn stage_add(&mut self, path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        let oid = Blob::new(content.clone()).object_id()?;
        let head_version = self.head_commit()?.blob_at(&path).cloned();

        if head_version.as_ref() == Some(&oid) {
            self.state_mut().index.unstage(&path);
            debug!(path = %path.display(), "content matches head, unstaged");
            return Ok(());
        }

        self.staging().write_pending(&path, &content)?;
        self.state_mut().index.stage_addition(path.clone(), oid.clone());
        debug!(path = %path.display(), %oid, "staged for addition");

        Ok(())
    }

    pub fn is_tracked(&self, path: &Path) -> anyhow::Result<bool> {
        Ok(self.head_commit()?.blob_at(path).is_some())
    }
}
