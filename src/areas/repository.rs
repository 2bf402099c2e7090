use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::staging::StagingArea;
use crate::areas::state::{RepositoryState, StateFile};
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::Status;
use crate::errors::Error;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Name of the metadata directory at the working-directory root
pub const REPOSITORY_DIR: &str = ".twig";

pub struct Repository {
    writer: RefCell<Box<dyn Write>>,
    database: Database,
    workspace: Workspace,
    staging: StagingArea,
    state_file: StateFile,
    state: RepositoryState,
}

impl Repository {
    /// Open the repository rooted at `path`
    pub fn open(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let state_file = StateFile::new(path.join(REPOSITORY_DIR).join("state").into_boxed_path());

        if !state_file.exists() {
            anyhow::bail!(Error::NoRepository);
        }
        let state = state_file.load()?;

        Ok(Self::assemble(path.into_boxed_path(), writer, state_file, state))
    }

    /// Create a repository at `path` holding only the root commit on `master`
    pub fn init(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;
        let git_path = path.join(REPOSITORY_DIR);

        if git_path.exists() {
            anyhow::bail!(Error::RepositoryExists);
        }

        let database = Database::new(git_path.join("objects").into_boxed_path());
        std::fs::create_dir_all(database.objects_path())?;
        std::fs::create_dir_all(git_path.join("staging"))?;

        let root = database.put_commit(&Commit::root())?;
        let state = RepositoryState {
            refs: Refs::new(root),
            index: Default::default(),
        };
        let state_file = StateFile::new(git_path.join("state").into_boxed_path());
        state_file.store(&state)?;

        let repository = Self::assemble(path.into_boxed_path(), writer, state_file, state);
        writeln!(
            repository.writer(),
            "Initialized empty twig repository in {}",
            git_path.display()
        )?;

        Ok(repository)
    }

    fn assemble(
        path: Box<Path>,
        writer: Box<dyn Write>,
        state_file: StateFile,
        state: RepositoryState,
    ) -> Self {
        let git_path = path.join(REPOSITORY_DIR);

        Repository {
            database: Database::new(git_path.join("objects").into_boxed_path()),
            workspace: Workspace::new(path),
            staging: StagingArea::new(git_path.join("staging").into_boxed_path()),
            writer: RefCell::new(writer),
            state_file,
            state,
        }
    }

    /// Write the in-memory state back, then drop pending content it no longer needs.
    pub fn persist(&self) -> anyhow::Result<()> {
        self.state_file.store(&self.state)?;
        self.staging.prune(&self.state.index)?;
        debug!(head = %self.state.refs.head(), "persisted repository state");

        Ok(())
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RepositoryState {
        &mut self.state
    }

    pub fn working_status(&'_ self) -> Status<'_> {
        Status::new(self)
    }

    pub fn head_oid(&self) -> anyhow::Result<ObjectId> {
        Ok(self.state.refs.head_commit()?.clone())
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.database.get_commit(&self.head_oid()?)
    }
}
