//! Remote credentials.

use git2::{Cred, RemoteCallbacks};

/// Credentials for a store repository.
///
/// Anonymous access is its own variant rather than a pair of empty
/// strings, so "no credentials supplied" and "empty password" cannot be
/// confused at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    /// No credentials; public repositories only.
    #[default]
    Anonymous,
    /// HTTP basic auth.
    Basic { username: String, password: String },
}

impl Credentials {
    /// Build basic-auth credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Remote callbacks carrying these credentials.
    ///
    /// For [`Credentials::Anonymous`] no credential callback is installed;
    /// a remote that demands auth then fails the operation with an auth
    /// error, which [`crate::Error::from_remote`] surfaces as
    /// [`crate::Error::AuthFailed`].
    pub fn callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        if let Credentials::Basic { username, password } = self {
            callbacks.credentials(move |_url, _username_from_url, _allowed| {
                Cred::userpass_plaintext(username, password)
            });
        }
        callbacks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous() {
        assert_eq!(Credentials::default(), Credentials::Anonymous);
    }

    #[test]
    fn test_basic_constructor() {
        let creds = Credentials::basic("user", "secret");
        assert_eq!(
            creds,
            Credentials::Basic {
                username: "user".to_string(),
                password: "secret".to_string(),
            }
        );
    }

    #[test]
    fn test_anonymous_is_not_empty_basic() {
        assert_ne!(Credentials::Anonymous, Credentials::basic("", ""));
    }
}
