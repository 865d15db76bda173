use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::KitError;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the repository metadata directory
pub const KIT_DIR: &str = ".kit";

/// High-level repository state
///
/// Owns the component areas and threads the repository root through them,
/// resolved once at construction. Commands are implemented as methods on
/// this type (see `commands::porcelain`).
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let kit_path = path.join(KIT_DIR);

        let index = Index::new(kit_path.join("index").into_boxed_path());
        let database = Database::new(kit_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(kit_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kit_path(&self) -> Box<Path> {
        self.path.join(KIT_DIR).into_boxed_path()
    }

    pub fn is_initialized(&self) -> bool {
        self.kit_path().is_dir()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The commit the current branch points at
    pub fn current_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let branch_name = self.refs.current_branch()?;
        let oid = self
            .refs
            .read_branch(&branch_name)?
            .ok_or_else(|| anyhow::anyhow!("branch {branch_name} does not point at a commit"))?;
        let commit = self.database.load_commit(&oid)?;

        Ok((oid, commit))
    }

    /// Resolve a possibly-abbreviated commit id and load the commit
    pub fn resolve_commit(&self, token: &str) -> anyhow::Result<(ObjectId, Commit)> {
        let oid = self
            .database
            .resolve_commit_id(token)?
            .ok_or(KitError::CommitNotFound)?;
        let commit = self.database.load_commit(&oid)?;

        Ok((oid, commit))
    }
}
