//! Persisted repository state
//!
//! The branch table, HEAD and the staging index form one record stored as JSON
//! in `.twig/state`. It is loaded once when the repository is opened and
//! replaced atomically (temp file, fsync, rename) at the end of a successful
//! command, under an exclusive lock on `.twig/state.lock`.

use crate::areas::index::Index;
use crate::areas::refs::Refs;
use anyhow::Context;
use fake::rand;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    pub refs: Refs,
    pub index: Index,
}

#[derive(Debug)]
pub struct StateFile {
    path: Box<Path>,
    lock_path: PathBuf,
}

impl StateFile {
    pub fn new(path: Box<Path>) -> Self {
        let lock_path = path.with_extension("lock");
        StateFile { path, lock_path }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the state record under a shared lock
    pub fn load(&self) -> anyhow::Result<RepositoryState> {
        let mut lock_file = self.open_lock_file()?;
        let _lock = file_guard::lock(&mut lock_file, file_guard::Lock::Shared, 0, 1)
            .context("Unable to lock repository state")?;

        let content = std::fs::read(&self.path)
            .with_context(|| format!("Unable to read {}", self.path.display()))?;

        serde_json::from_slice(&content)
            .with_context(|| format!("Corrupt repository state {}", self.path.display()))
    }

    /// Atomically replace the state record under an exclusive lock
    pub fn store(&self, state: &RepositoryState) -> anyhow::Result<()> {
        let mut lock_file = self.open_lock_file()?;
        let _lock = file_guard::lock(&mut lock_file, file_guard::Lock::Exclusive, 0, 1)
            .context("Unable to lock repository state")?;

        let dir = self
            .path
            .parent()
            .context(format!("Invalid state path {}", self.path.display()))?;
        let temp_path = dir.join(Self::generate_temp_name());

        let content = serde_json::to_vec_pretty(state)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to open {}", temp_path.display()))?;
        file.write_all(&content)?;
        file.sync_all()?;

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Unable to replace {}", self.path.display()))?;

        Ok(())
    }

    fn open_lock_file(&self) -> anyhow::Result<std::fs::File> {
        std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .with_context(|| format!("Unable to open {}", self.lock_path.display()))
    }

    fn generate_temp_name() -> String {
        format!("tmp-state-{}", rand::random::<u32>())
    }
}
