//! User-facing commands
//!
//! Each command is an `impl Repository` block working on the in-memory
//! repository state. Callers persist the state once a command succeeds; a
//! failed command leaves the persisted state untouched.
//!
//! - `add` / `rm`: Stage additions and removals
//! - `commit`: Snapshot the staged changes
//! - `log`: `log`, `global-log` and `find`
//! - `status`: Branches, staged and unstaged changes, untracked files
//! - `checkout`: Restore a file or switch branches
//! - `branch`: Create and delete branches
//! - `reset`: Move the current branch to any commit
//! - `merge`: Three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
