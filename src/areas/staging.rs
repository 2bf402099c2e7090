//! Pending area for staged content
//!
//! `add` copies the file's bytes here (`.twig/staging/<path>`) so a later edit
//! of the working file cannot change what gets committed. Files are pruned only
//! once the state record no longer references them.

use crate::areas::index::Index;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct StagingArea {
    path: Box<Path>,
}

impl StagingArea {
    pub fn new(path: Box<Path>) -> Self {
        StagingArea { path }
    }

    pub fn write_pending(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let pending_path = self.path.join(file_path);

        if pending_path.is_dir() {
            std::fs::remove_dir_all(&pending_path)?;
        }
        // content of a file that used to sit where a parent directory goes
        for ancestor in file_path.ancestors().skip(1) {
            let ancestor_path = self.path.join(ancestor);
            if ancestor != Path::new("") && ancestor_path.is_file() {
                std::fs::remove_file(&ancestor_path)
                    .with_context(|| format!("Unable to unstage {}", ancestor.display()))?;
            }
        }
        if let Some(parent) = pending_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create {}", parent.display()))?;
        }

        std::fs::write(&pending_path, data)
            .with_context(|| format!("Unable to stage {}", file_path.display()))
    }

    pub fn read_pending(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))
            .with_context(|| format!("Staged content of {} is missing", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    /// Delete pending files (and emptied directories) `index` no longer stages.
    pub fn prune(&self, index: &Index) -> anyhow::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let walker = WalkDir::new(&self.path).min_depth(1).contents_first(true);

        for entry in walker {
            let entry = entry?;
            let Ok(relative) = entry.path().strip_prefix(self.path.as_ref()) else {
                continue;
            };

            if entry.file_type().is_dir() {
                let is_empty = std::fs::read_dir(entry.path())?.next().is_none();
                if is_empty {
                    std::fs::remove_dir(entry.path())?;
                }
            } else if index.staged_addition(relative).is_none() {
                std::fs::remove_file(entry.path())?;
            }
        }

        Ok(())
    }

    pub fn pending_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.path).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file()
                && let Ok(relative) = entry.path().strip_prefix(self.path.as_ref())
            {
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }
}
