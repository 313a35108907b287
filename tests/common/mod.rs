//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a commit on HEAD writing `message` into `test.txt`. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        self.commit_as("Test User", "test@example.com", message)
    }

    /// Create a commit on HEAD with a specific author.
    pub fn commit_as(&self, name: &str, email: &str, message: &str) -> Oid {
        self.commit_with(name, email, "test.txt", message)
    }

    /// Create a commit on HEAD that only touches `file`, so its patch mentions nothing else.
    pub fn commit_file(&self, file: &str, message: &str) -> Oid {
        self.commit_with("Test User", "test@example.com", file, message)
    }

    /// Create a commit on HEAD by `name <email>` writing `message` into `file`.
    pub fn commit_with(&self, name: &str, email: &str, file: &str, message: &str) -> Oid {
        let sig = Signature::now(name, email).expect("Failed to create signature");
        let tree = self.write_tree(file, message);
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a parentless commit that no branch points to.
    pub fn dangling_root_commit(&self, message: &str) -> Oid {
        let sig = Signature::now("Other User", "other@example.com")
            .expect("Failed to create signature");
        let tree = self.write_tree("other.txt", message);

        self.repo
            .commit(None, &sig, &sig, message, &tree, &[])
            .expect("Failed to create dangling commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    fn write_tree(&self, file: &str, content: &str) -> git2::Tree<'_> {
        std::fs::write(self.dir.path().join(file), format!("{}\n", content))
            .expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(file)).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        self.repo.find_tree(tree_id).expect("Failed to find tree")
    }
}
