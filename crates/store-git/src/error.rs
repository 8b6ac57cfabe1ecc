//! Error types for store-git

/// Result type for store-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to a store repository.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote could not be reached (network, DNS, or TLS failure).
    #[error("remote unreachable: {message}")]
    Unreachable { message: String },

    /// The remote rejected the supplied credentials.
    #[error("authentication failed: {message}")]
    AuthFailed { message: String },

    /// The requested reference does not exist on the remote.
    #[error("reference '{name}' not found")]
    RefNotFound { name: String },

    /// No blob at the given path within the resolved tree.
    #[error("path '{path}' not found in tree")]
    PathNotFound { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),
}

impl Error {
    /// Classify a `git2::Error` raised during remote negotiation or fetch.
    ///
    /// Auth rejections and transport failures get their own variants so
    /// callers can distinguish "bad credentials" from "remote is down"
    /// without string matching. Everything else stays a plain git error.
    pub(crate) fn from_remote(err: git2::Error) -> Self {
        match (err.code(), err.class()) {
            (git2::ErrorCode::Auth, _) => Error::AuthFailed {
                message: err.message().to_string(),
            },
            (git2::ErrorCode::Certificate, _)
            | (
                _,
                git2::ErrorClass::Net
                | git2::ErrorClass::Ssl
                | git2::ErrorClass::Http
                | git2::ErrorClass::Ssh,
            ) => Error::Unreachable {
                message: err.message().to_string(),
            },
            _ => Error::Git(err),
        }
    }
}
