//! User-facing failure kinds
//!
//! Every fatal command outcome maps to one of these variants; the message is
//! printed as a single line and the process exits non-zero. Internal I/O
//! failures are reported through `anyhow` with context instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KitError {
    #[error("Not in an initialized kit directory.")]
    NotInitialized,
    #[error("A kit version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("File does not exist.")]
    FileNotFound,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("Please enter a commit message.")]
    EmptyMessage,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("Found no commit with that message.")]
    NoMatchingCommit,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrent,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("No commit with that id exists.")]
    CommitNotFound,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    CannotMergeSelf,
}
