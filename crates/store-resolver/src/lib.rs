//! Tag-addressed extension resolution.
//!
//! An extension store is a plain git repository: each extension lives
//! under `dist/<name>/` with a `meta.json` describing it, and every
//! published version is a tag `ext/<name>/v<semver>`. This crate turns
//! that convention into three read operations (list an extension's
//! versions, check out one version, inventory the whole store) without
//! ever fetching more than the one ref each operation needs.

pub mod checkout;
pub mod error;
pub mod inventory;
pub mod metadata;
pub mod semver_tags;
pub mod store;

pub use error::{Error, Result};
pub use store::ExtensionStore;

/// Directory under which extensions live in a store repository.
pub const DIST_DIR: &str = "dist";

/// The metadata filename every extension directory must contain.
pub const META_FILENAME: &str = "meta.json";

/// Tag namespace prefix for one extension's versions (`ext/<name>/v`).
pub fn tag_prefix(extension: &str) -> String {
    format!("ext/{extension}/v")
}

/// The exact tag name addressing one version of one extension.
pub fn tag_name(extension: &str, version: &str) -> String {
    format!("ext/{extension}/v{version}")
}
