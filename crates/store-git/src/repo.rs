//! Scratch bare repositories for narrow fetches.

use std::path::Path;

use git2::{FetchOptions, ObjectType, Repository, Tree};
use tempfile::TempDir;

use crate::auth::Credentials;
use crate::error::{Error, Result};

const REMOTE_NAME: &str = "origin";

/// A bare repository in a temporary directory, wired to a single remote.
///
/// Created empty: no refs are fetched until one of the fetch methods is
/// called, so the cost of an operation is proportional to the one ref it
/// pulls, never to the remote's full history. No working tree is ever
/// materialized. The backing directory is deleted when the handle drops,
/// on every exit path.
pub struct ScratchRepo {
    repo: Repository,
    credentials: Credentials,
    _dir: TempDir,
}

impl ScratchRepo {
    /// Initialise a scratch repository pointing at `url`.
    ///
    /// Opens no network connection; failures here are local I/O only.
    pub fn create(url: &str, credentials: &Credentials) -> Result<Self> {
        let dir = TempDir::new()?;
        let repo = Repository::init_bare(dir.path())?;
        repo.remote(REMOTE_NAME, url)?;
        Ok(Self {
            repo,
            credentials: credentials.clone(),
            _dir: dir,
        })
    }

    /// Fetch exactly one reference, making its object graph addressable.
    ///
    /// Returns [`Error::RefNotFound`] when the remote does not advertise
    /// the ref. libgit2 treats a refspec that matches nothing as an empty
    /// fetch rather than an error, so the local ref is checked afterwards.
    pub fn fetch_ref(&self, refname: &str) -> Result<()> {
        tracing::debug!(refname, "fetching single ref");
        self.fetch(refname, None)
    }

    /// Depth-1 fetch of one branch, for inventory reads of the tip tree.
    ///
    /// Some transports (notably local ones) reject shallow negotiation;
    /// those retry as a full single-branch fetch.
    pub fn fetch_branch_shallow(&self, refname: &str) -> Result<()> {
        tracing::debug!(refname, "shallow-fetching branch tip");
        match self.fetch(refname, Some(1)) {
            Err(Error::Git(err)) => {
                tracing::debug!(error = %err, "shallow fetch rejected, retrying full");
                self.fetch(refname, None)
            }
            other => other,
        }
    }

    fn fetch(&self, refname: &str, depth: Option<i32>) -> Result<()> {
        let mut remote = self.repo.find_remote(REMOTE_NAME)?;
        let refspec = format!("+{refname}:{refname}");
        let mut opts = FetchOptions::new();
        opts.remote_callbacks(self.credentials.callbacks());
        // Only the explicit refspec, never auto-followed tags.
        opts.download_tags(git2::AutotagOption::None);
        if let Some(depth) = depth {
            opts.depth(depth);
        }
        remote
            .fetch(&[refspec.as_str()], Some(&mut opts), None)
            .map_err(Error::from_remote)?;
        if self.repo.find_reference(refname).is_err() {
            return Err(Error::RefNotFound {
                name: refname.to_string(),
            });
        }
        Ok(())
    }

    /// Resolve a previously fetched ref to its commit's tree.
    pub fn commit_tree(&self, refname: &str) -> Result<Tree<'_>> {
        let reference =
            self.repo
                .find_reference(refname)
                .map_err(|_| Error::RefNotFound {
                    name: refname.to_string(),
                })?;
        let commit = reference.peel_to_commit()?;
        Ok(commit.tree()?)
    }

    /// Read the blob at `path` within `tree`.
    pub fn read_blob(&self, tree: &Tree<'_>, path: &str) -> Result<Vec<u8>> {
        let entry = tree
            .get_path(Path::new(path))
            .map_err(|_| Error::PathNotFound {
                path: path.to_string(),
            })?;
        let object = entry.to_object(&self.repo)?;
        let blob = object.into_blob().map_err(|_| Error::PathNotFound {
            path: path.to_string(),
        })?;
        Ok(blob.content().to_vec())
    }

    /// Names of the immediate subdirectories of `path` within `tree`.
    ///
    /// Only tree entries are returned; blobs at that level are skipped.
    pub fn list_subdirs(&self, tree: &Tree<'_>, path: &str) -> Result<Vec<String>> {
        let entry = tree
            .get_path(Path::new(path))
            .map_err(|_| Error::PathNotFound {
                path: path.to_string(),
            })?;
        if entry.kind() != Some(ObjectType::Tree) {
            return Err(Error::PathNotFound {
                path: path.to_string(),
            });
        }
        let dir = self.repo.find_tree(entry.id())?;
        Ok(dir
            .iter()
            .filter(|e| e.kind() == Some(ObjectType::Tree))
            .filter_map(|e| e.name().map(str::to_string))
            .collect())
    }
}
