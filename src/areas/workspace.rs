use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Regular files under `root_dir` (default: the whole working directory),
    /// relative to the working directory and skipping `.twig`
    pub fn list_files(&self, root_dir: Option<&Path>) -> anyhow::Result<Vec<PathBuf>> {
        let root_dir = match root_dir {
            Some(dir) => self.path.join(dir),
            None => self.path.to_path_buf(),
        };
        if !root_dir.exists() {
            return Ok(vec![]);
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != REPOSITORY_DIR);

        for entry in walker {
            let entry = entry.context("Unable to walk the working directory")?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(self.path.as_ref()) {
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Path relative to the working directory, `.` and `..` components dropped
    pub fn relative_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        let path = path.strip_prefix(self.path.as_ref()).unwrap_or(path);

        path.components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_directory(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_dir()
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);

        let content = std::fs::read(&full_path)
            .with_context(|| format!("Unable to read file {}", file_path.display()))?;

        Ok(Bytes::from(content))
    }

    /// Blob id the file would get if staged, `None` if there is no such file
    pub fn hash_file(&self, file_path: &Path) -> anyhow::Result<Option<ObjectId>> {
        if !self.is_file(file_path) {
            return Ok(None);
        }

        let blob = Blob::new(self.read_file(file_path)?);
        Ok(Some(blob.object_id()?))
    }

    /// Write `data` at `file_path`, creating missing parent directories.
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent of {:?}", file_path))?;
        }
        if full_path.is_dir() {
            std::fs::remove_dir_all(&full_path)
                .with_context(|| format!("Failed to remove existing directory: {:?}", file_path))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&full_path)
            .with_context(|| format!("Failed to open file: {:?}", file_path))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {:?}", file_path))?;

        Ok(())
    }

    /// Delete a file and prune the directories it leaves empty.
    pub fn remove_file(&self, file_path: &Path) -> anyhow::Result<()> {
        let full_path = self.path.join(file_path);

        if full_path.is_file() {
            std::fs::remove_file(&full_path)
                .with_context(|| format!("Failed to remove file: {:?}", file_path))?;
        }

        for ancestor in file_path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            let dir = self.path.join(ancestor);
            let is_empty = std::fs::read_dir(&dir)
                .map(|mut entries| entries.next().is_none())
                .unwrap_or(false);
            if !is_empty {
                break;
            }
            std::fs::remove_dir(&dir)
                .with_context(|| format!("Failed to remove directory: {:?}", ancestor))?;
        }

        Ok(())
    }

    // Deletions go first so a file can replace a directory emptied by them.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for action in [ActionType::Delete, ActionType::Modify, ActionType::Add] {
            self.apply_migration_action_set(migration, action)?;
        }

        Ok(())
    }

    fn apply_migration_action_set(
        &self,
        migration: &Migration,
        action: ActionType,
    ) -> anyhow::Result<()> {
        let Some(entries) = migration.actions().get(&action) else {
            return Ok(());
        };

        for (file_path, oid) in entries {
            match (&action, oid) {
                (ActionType::Delete, None) => self.remove_file(file_path)?,
                (ActionType::Add | ActionType::Modify, Some(oid)) => {
                    let data = migration.load_blob_data(oid)?;
                    self.write_file(file_path, &data)?;
                }
                _ => anyhow::bail!("Invalid action and entry combination"),
            }
            debug!(?action, path = %file_path.display(), "applied workspace change");
        }

        Ok(())
    }
}
