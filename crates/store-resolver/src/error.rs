/// Errors that can occur resolving extensions out of a store.
///
/// All variants are terminal for the operation that raised them; nothing
/// is retried here. Transport and auth failures from the git layer pass
/// through untouched.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Listing found no well-formed version tags under the prefix.
    #[error("no matching tags found with prefix '{prefix}'")]
    NoMatchingVersions { prefix: String },

    /// The requested version tag does not exist in the store.
    #[error("version tag '{tag}' not found in store")]
    VersionNotFound { tag: String },

    /// The extension has no `meta.json` at the resolved revision.
    #[error("extension metadata not found at '{path}'")]
    MetadataMissing { path: String },

    /// `meta.json` is present but not valid, or lacks the required shape.
    #[error("malformed extension metadata: {reason}")]
    MetadataMalformed { reason: String },

    /// The file named by `config.code_source` is absent from the tree.
    #[error("code file '{path}' not found in store")]
    CodeFileMissing { path: String },

    /// Transport, auth, or other git-level failure.
    #[error(transparent)]
    Git(#[from] store_git::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
