//! Local git repository fixture shaped like an extension store.

use std::fs;

use git2::{IndexAddOption, Oid, Repository, RepositoryInitOptions};
use tempfile::TempDir;

/// A throwaway local repository acting as the remote store in tests.
///
/// Built entirely with `git2`, so fixtures need no system git binary.
/// The default branch is always `main`.
///
/// # Panics
/// All methods panic on failure; fixtures are test-only code.
pub struct StoreRepo {
    dir: TempDir,
    repo: Repository,
}

impl Default for StoreRepo {
    fn default() -> Self {
        Self::init()
    }
}

impl StoreRepo {
    /// Initialise an empty store repository on a `main` branch.
    pub fn init() -> Self {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("StoreRepo: tempdir failed: {e}"));
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts)
            .unwrap_or_else(|e| panic!("StoreRepo: init failed: {e}"));
        {
            let mut config = repo
                .config()
                .unwrap_or_else(|e| panic!("StoreRepo: config failed: {e}"));
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@test.com").unwrap();
        }
        Self { dir, repo }
    }

    /// The fixture's URL as seen by a transport client (a local path).
    pub fn url(&self) -> String {
        self.dir.path().to_str().expect("utf-8 tempdir path").to_string()
    }

    /// Write `files` (path, contents) into the worktree and commit them
    /// on `main`. Returns the new commit id.
    pub fn commit_files(&self, files: &[(&str, &str)], message: &str) -> Oid {
        for (path, contents) in files {
            let full = self.dir.path().join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent)
                    .unwrap_or_else(|e| panic!("StoreRepo: mkdir {path}: {e}"));
            }
            fs::write(&full, contents).unwrap_or_else(|e| panic!("StoreRepo: write {path}: {e}"));
        }

        let mut index = self
            .repo
            .index()
            .unwrap_or_else(|e| panic!("StoreRepo: index: {e}"));
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .unwrap_or_else(|e| panic!("StoreRepo: add_all: {e}"));
        index.write().unwrap_or_else(|e| panic!("StoreRepo: index write: {e}"));
        let tree_id = index
            .write_tree()
            .unwrap_or_else(|e| panic!("StoreRepo: write_tree: {e}"));

        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = self.repo.signature().unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap_or_else(|e| panic!("StoreRepo: commit: {e}"))
    }

    /// Create a lightweight tag named `name` pointing at `commit`.
    pub fn tag(&self, name: &str, commit: Oid) {
        let object = self
            .repo
            .find_object(commit, None)
            .unwrap_or_else(|e| panic!("StoreRepo: find commit {commit}: {e}"));
        self.repo
            .tag_lightweight(name, &object, false)
            .unwrap_or_else(|e| panic!("StoreRepo: tag {name}: {e}"));
    }

    /// Commit a complete extension directory: `dist/<name>/meta.json`
    /// plus any sibling files, then tag it `ext/<name>/v<version>`.
    pub fn add_extension_version(
        &self,
        name: &str,
        version: &str,
        meta: &str,
        files: &[(&str, &str)],
    ) {
        let meta_path = format!("dist/{name}/meta.json");
        let mut all: Vec<(String, &str)> = vec![(meta_path, meta)];
        for (file, contents) in files {
            all.push((format!("dist/{name}/{file}"), contents));
        }
        let borrowed: Vec<(&str, &str)> =
            all.iter().map(|(p, c)| (p.as_str(), *c)).collect();
        let commit = self.commit_files(&borrowed, &format!("{name} {version}"));
        self.tag(&format!("ext/{name}/v{version}"), commit);
    }
}
