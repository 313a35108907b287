//! Git operations: enumeration with git2, per-commit lookups with the git binary.

pub mod describe;
pub mod range;

pub use describe::{
    GitCli, RevisionChangeset, RevisionMetadata, RevisionSource, check_git_installed,
};
pub use range::{collect_until_boundary, enumerate_revisions, resolve_commit};
