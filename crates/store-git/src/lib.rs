//! Git transport client for the extension store.
//!
//! Everything here is generic over git: scratch bare repositories, narrow
//! single-ref fetches, shallow branch fetches, remote tag listing, and
//! blob/tree reads. Extension naming and semver live one layer up.

pub mod auth;
pub mod error;
pub mod remote;
pub mod repo;

pub use auth::Credentials;
pub use error::{Error, Result};
pub use remote::{default_branch, list_remote_tags};
pub use repo::ScratchRepo;

/// Ref namespace prefix under which remotes advertise tags.
pub const TAG_REF_PREFIX: &str = "refs/tags/";
