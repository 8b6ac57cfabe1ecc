//! Clone-free remote negotiation: tag listing and HEAD discovery.

use git2::Direction;

use crate::TAG_REF_PREFIX;
use crate::auth::Credentials;
use crate::error::{Error, Result};

/// Fallback when a remote does not advertise a HEAD symref.
const FALLBACK_BRANCH: &str = "refs/heads/main";

/// List the remote's tag refs whose name starts with `prefix`.
///
/// A single ref advertisement against the remote; no objects are
/// transferred and nothing is cloned. Returned names are raw refs
/// (`refs/tags/<prefix>…`); peeled `^{}` entries for annotated tags are
/// dropped. The git wire protocol has no server-side prefix filter for
/// libgit2 clients, so filtering happens here.
pub fn list_remote_tags(
    url: &str,
    credentials: &Credentials,
    prefix: &str,
) -> Result<Vec<String>> {
    tracing::debug!(url, prefix, "listing remote tags");
    let mut remote = git2::Remote::create_detached(url)?;
    let connection = remote
        .connect_auth(Direction::Fetch, Some(credentials.callbacks()), None)
        .map_err(Error::from_remote)?;
    let heads = connection.list().map_err(Error::from_remote)?;

    let wanted = format!("{TAG_REF_PREFIX}{prefix}");
    Ok(heads
        .iter()
        .map(|head| head.name().to_string())
        .filter(|name| name.starts_with(&wanted) && !name.ends_with("^{}"))
        .collect())
}

/// The remote's default branch (its advertised HEAD symref target).
///
/// Falls back to `refs/heads/main` when the remote does not advertise
/// one. Transport and auth failures propagate.
pub fn default_branch(url: &str, credentials: &Credentials) -> Result<String> {
    let mut remote = git2::Remote::create_detached(url)?;
    let connection = remote
        .connect_auth(Direction::Fetch, Some(credentials.callbacks()), None)
        .map_err(Error::from_remote)?;
    match connection.default_branch() {
        Ok(buf) => Ok(String::from_utf8_lossy(&buf).into_owned()),
        Err(err) if err.code() == git2::ErrorCode::NotFound => {
            tracing::debug!(url, "remote advertises no HEAD, assuming {FALLBACK_BRANCH}");
            Ok(FALLBACK_BRANCH.to_string())
        }
        Err(err) => Err(Error::from_remote(err)),
    }
}
