//! Version listing and checkout of a single tagged version.

use serde_json::Value;
use store_git::{Credentials, ScratchRepo, TAG_REF_PREFIX, list_remote_tags};

use crate::error::{Error, Result};
use crate::{DIST_DIR, META_FILENAME, metadata, semver_tags, tag_name, tag_prefix};

/// List an extension's published versions, newest first.
///
/// A tag-only negotiation against the remote; nothing is cloned. Tags
/// that do not parse as `ext/<extension>/v<semver>` are ignored; only a
/// completely empty result is an error.
pub fn list_versions(store: &str, extension: &str) -> Result<Vec<String>> {
    let prefix = tag_prefix(extension);
    let raw = list_remote_tags(store, &Credentials::Anonymous, &prefix)?;
    let versions = semver_tags::matching_versions(&prefix, &raw);
    if versions.is_empty() {
        return Err(Error::NoMatchingVersions { prefix });
    }
    tracing::debug!(extension, count = versions.len(), "listed versions");
    Ok(versions.iter().map(ToString::to_string).collect())
}

/// Check out one tagged version as a single metadata+code document.
///
/// `version` is taken verbatim; callers obtain it from
/// [`list_versions`] or supply an exact tag suffix. The returned document
/// is the extension's `meta.json` with the raw text of the file named by
/// `config.code_source` injected at `config.code`. Metadata and code are
/// read from the same resolved tree, so they always belong to one atomic
/// tagged commit.
pub fn checkout(
    store: &str,
    extension: &str,
    version: &str,
    credentials: &Credentials,
) -> Result<Value> {
    let tag = tag_name(extension, version);
    let tag_ref = format!("{TAG_REF_PREFIX}{tag}");
    tracing::debug!(extension, version, "checking out tagged version");

    let repo = ScratchRepo::create(store, credentials)?;
    repo.fetch_ref(&tag_ref).map_err(|err| match err {
        store_git::Error::RefNotFound { .. } => Error::VersionNotFound { tag: tag.clone() },
        other => other.into(),
    })?;
    let tree = repo.commit_tree(&tag_ref)?;

    let meta_path = format!("{DIST_DIR}/{extension}/{META_FILENAME}");
    let meta_bytes = repo.read_blob(&tree, &meta_path).map_err(|err| match err {
        store_git::Error::PathNotFound { .. } => Error::MetadataMissing { path: meta_path.clone() },
        other => other.into(),
    })?;
    let mut doc = metadata::parse(&meta_bytes)?;

    let code_source = metadata::code_source(&doc)?.to_string();
    let code_path = format!("{DIST_DIR}/{extension}/{code_source}");
    let code_bytes = repo.read_blob(&tree, &code_path).map_err(|err| match err {
        store_git::Error::PathNotFound { .. } => Error::CodeFileMissing { path: code_path.clone() },
        other => other.into(),
    })?;

    metadata::set_code(&mut doc, String::from_utf8_lossy(&code_bytes).into_owned())?;
    Ok(doc)
}
