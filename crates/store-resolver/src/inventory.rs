//! Store-wide inventory of extension metadata.

use std::collections::HashMap;

use serde_json::Value;
use store_git::{Credentials, ScratchRepo, default_branch};

use crate::error::{Error, Result};
use crate::{DIST_DIR, META_FILENAME, metadata};

/// Map every extension in the store to its metadata document.
///
/// A depth-1 fetch of the default branch tip; each immediate
/// subdirectory of `dist/` is an extension, and only its `meta.json` is
/// read. Code bodies are never touched. Any single unreadable or
/// unparsable `meta.json` fails the whole listing: the inventory is
/// all-or-nothing, never partial.
pub fn list_store(store: &str, credentials: &Credentials) -> Result<HashMap<String, Value>> {
    let repo = ScratchRepo::create(store, credentials)?;
    let branch = default_branch(store, credentials)?;
    repo.fetch_branch_shallow(&branch)?;
    let tree = repo.commit_tree(&branch)?;

    let names = repo.list_subdirs(&tree, DIST_DIR)?;
    tracing::debug!(store, count = names.len(), "scanning store inventory");

    let mut inventory = HashMap::with_capacity(names.len());
    for name in names {
        let path = format!("{DIST_DIR}/{name}/{META_FILENAME}");
        let bytes = repo.read_blob(&tree, &path).map_err(|err| match err {
            store_git::Error::PathNotFound { .. } => Error::MetadataMissing { path: path.clone() },
            other => other.into(),
        })?;
        let doc = metadata::parse(&bytes).map_err(|err| match err {
            Error::MetadataMalformed { reason } => Error::MetadataMalformed {
                reason: format!("{path}: {reason}"),
            },
            other => other,
        })?;
        inventory.insert(name, doc);
    }
    Ok(inventory)
}
