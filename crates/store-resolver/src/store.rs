//! Public facade over the three store operations.

use std::collections::HashMap;

use serde_json::Value;
use store_git::Credentials;

use crate::error::Result;
use crate::{checkout, inventory};

/// Stateless entry point for the extension store.
///
/// Each call is self-contained: one transient scratch repository, no
/// cache, no shared state. Concurrent calls for different stores or
/// versions are fully independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionStore;

impl ExtensionStore {
    pub fn new() -> Self {
        Self
    }

    /// Published versions of `extension`, newest first.
    pub fn list_versions(&self, store: &str, extension: &str) -> Result<Vec<String>> {
        checkout::list_versions(store, extension)
    }

    /// One tagged version as a metadata+code document.
    pub fn checkout(
        &self,
        store: &str,
        extension: &str,
        version: &str,
        credentials: &Credentials,
    ) -> Result<Value> {
        checkout::checkout(store, extension, version, credentials)
    }

    /// All extensions in the store, mapped to their metadata documents.
    pub fn list_store(
        &self,
        store: &str,
        credentials: &Credentials,
    ) -> Result<HashMap<String, Value>> {
        inventory::list_store(store, credentials)
    }
}
