//! End-to-end resolver tests against local fixture stores.
//!
//! Every test builds a real git repository shaped like an extension
//! store, then drives the public [`ExtensionStore`] operations against
//! it the way the HTTP layer would.

use pretty_assertions::assert_eq;
use serde_json::json;
use store_git::Credentials;
use store_resolver::{Error, ExtensionStore};
use store_test_utils::StoreRepo;

const FOO_META: &str = r#"{
  "name": "foo",
  "config": {"code_source": "index.js", "runtime": "nodejs22.x"}
}"#;

/// A store with three tagged versions of `foo` plus unrelated tags.
fn store_with_versions() -> StoreRepo {
    let fixture = StoreRepo::init();
    fixture.add_extension_version("foo", "1.0.0", FOO_META, &[("index.js", "console.log(1)")]);
    fixture.add_extension_version("foo", "1.1.0-beta", FOO_META, &[("index.js", "console.log(2)")]);
    fixture.add_extension_version("foo", "1.2.0", FOO_META, &[("index.js", "console.log(3)")]);
    // Noise the matcher must ignore
    let commit = fixture.commit_files(&[("README.md", "# store")], "docs");
    fixture.tag("release-2024", commit);
    fixture.tag("ext/foo/vnot-semver", commit);
    fixture
}

// --- ListVersions ---

#[test]
fn test_list_versions_descending_with_prerelease() {
    let fixture = store_with_versions();
    let resolver = ExtensionStore::new();

    let versions = resolver.list_versions(&fixture.url(), "foo").unwrap();

    assert_eq!(versions, vec!["1.2.0", "1.1.0-beta", "1.0.0"]);
}

#[test]
fn test_list_versions_unknown_extension_is_no_matching_versions() {
    let fixture = store_with_versions();
    let resolver = ExtensionStore::new();

    let err = resolver.list_versions(&fixture.url(), "bar").unwrap_err();
    assert!(matches!(err, Error::NoMatchingVersions { .. }), "got: {err}");
}

#[test]
fn test_list_versions_store_without_tags() {
    let fixture = StoreRepo::init();
    fixture.commit_files(&[("dist/foo/meta.json", FOO_META)], "untagged");
    let resolver = ExtensionStore::new();

    let err = resolver.list_versions(&fixture.url(), "foo").unwrap_err();
    assert!(matches!(err, Error::NoMatchingVersions { .. }), "got: {err}");
}

// --- Checkout ---

#[test]
fn test_checkout_assembles_metadata_and_code() {
    let fixture = store_with_versions();
    let resolver = ExtensionStore::new();

    let doc = resolver
        .checkout(&fixture.url(), "foo", "1.2.0", &Credentials::Anonymous)
        .unwrap();

    assert_eq!(
        doc,
        json!({
            "name": "foo",
            "config": {
                "code_source": "index.js",
                "runtime": "nodejs22.x",
                "code": "console.log(3)"
            }
        })
    );
}

#[test]
fn test_checkout_reads_the_tagged_revision_not_the_tip() {
    let fixture = store_with_versions();
    let resolver = ExtensionStore::new();

    // 1.0.0 was tagged before later commits rewrote index.js
    let doc = resolver
        .checkout(&fixture.url(), "foo", "1.0.0", &Credentials::Anonymous)
        .unwrap();

    assert_eq!(doc["config"]["code"], json!("console.log(1)"));
}

#[test]
fn test_checkout_is_idempotent() {
    let fixture = store_with_versions();
    let resolver = ExtensionStore::new();

    let first = resolver
        .checkout(&fixture.url(), "foo", "1.2.0", &Credentials::Anonymous)
        .unwrap();
    let second = resolver
        .checkout(&fixture.url(), "foo", "1.2.0", &Credentials::Anonymous)
        .unwrap();

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[test]
fn test_checkout_unknown_version_is_version_not_found() {
    let fixture = store_with_versions();
    let resolver = ExtensionStore::new();

    let err = resolver
        .checkout(&fixture.url(), "foo", "9.9.9", &Credentials::Anonymous)
        .unwrap_err();
    assert!(matches!(err, Error::VersionNotFound { .. }), "got: {err}");
}

#[test]
fn test_checkout_without_code_source_is_metadata_malformed() {
    let fixture = StoreRepo::init();
    fixture.add_extension_version(
        "foo",
        "1.0.0",
        r#"{"name": "foo", "config": {}}"#,
        &[("index.js", "console.log(1)")],
    );
    let resolver = ExtensionStore::new();

    let err = resolver
        .checkout(&fixture.url(), "foo", "1.0.0", &Credentials::Anonymous)
        .unwrap_err();
    assert!(matches!(err, Error::MetadataMalformed { .. }), "got: {err}");
}

#[test]
fn test_checkout_unparsable_meta_is_metadata_malformed() {
    let fixture = StoreRepo::init();
    fixture.add_extension_version("foo", "1.0.0", "{not json", &[("index.js", "x")]);
    let resolver = ExtensionStore::new();

    let err = resolver
        .checkout(&fixture.url(), "foo", "1.0.0", &Credentials::Anonymous)
        .unwrap_err();
    assert!(matches!(err, Error::MetadataMalformed { .. }), "got: {err}");
}

#[test]
fn test_checkout_dangling_code_source_is_code_file_missing() {
    let fixture = StoreRepo::init();
    fixture.add_extension_version(
        "foo",
        "1.0.0",
        r#"{"config": {"code_source": "absent.js"}}"#,
        &[("index.js", "console.log(1)")],
    );
    let resolver = ExtensionStore::new();

    let err = resolver
        .checkout(&fixture.url(), "foo", "1.0.0", &Credentials::Anonymous)
        .unwrap_err();
    assert!(matches!(err, Error::CodeFileMissing { .. }), "got: {err}");
}

#[test]
fn test_checkout_extension_without_meta_is_metadata_missing() {
    let fixture = StoreRepo::init();
    let commit = fixture.commit_files(&[("dist/foo/index.js", "console.log(1)")], "no meta");
    fixture.tag("ext/foo/v1.0.0", commit);
    let resolver = ExtensionStore::new();

    let err = resolver
        .checkout(&fixture.url(), "foo", "1.0.0", &Credentials::Anonymous)
        .unwrap_err();
    assert!(matches!(err, Error::MetadataMissing { .. }), "got: {err}");
}

// --- ListStore ---

#[test]
fn test_list_store_maps_every_extension() {
    let fixture = StoreRepo::init();
    fixture.commit_files(
        &[
            ("dist/alpha/meta.json", r#"{"name": "alpha"}"#),
            ("dist/beta/meta.json", r#"{"name": "beta"}"#),
        ],
        "two extensions",
    );
    let resolver = ExtensionStore::new();

    let inventory = resolver
        .list_store(&fixture.url(), &Credentials::Anonymous)
        .unwrap();

    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory["alpha"], json!({"name": "alpha"}));
    assert_eq!(inventory["beta"], json!({"name": "beta"}));
}

#[test]
fn test_list_store_is_all_or_nothing() {
    let fixture = StoreRepo::init();
    fixture.commit_files(
        &[
            ("dist/alpha/meta.json", r#"{"name": "alpha"}"#),
            // beta has files but no meta.json
            ("dist/beta/index.js", "console.log(1)"),
        ],
        "one broken extension",
    );
    let resolver = ExtensionStore::new();

    let err = resolver
        .list_store(&fixture.url(), &Credentials::Anonymous)
        .unwrap_err();
    assert!(matches!(err, Error::MetadataMissing { .. }), "got: {err}");
}

#[test]
fn test_list_store_fails_on_unparsable_meta() {
    let fixture = StoreRepo::init();
    fixture.commit_files(
        &[
            ("dist/alpha/meta.json", r#"{"name": "alpha"}"#),
            ("dist/beta/meta.json", "{not json"),
        ],
        "one unparsable extension",
    );
    let resolver = ExtensionStore::new();

    let err = resolver
        .list_store(&fixture.url(), &Credentials::Anonymous)
        .unwrap_err();
    assert!(matches!(err, Error::MetadataMalformed { .. }), "got: {err}");
}

#[test]
fn test_list_store_ignores_code_bodies() {
    let fixture = StoreRepo::init();
    fixture.commit_files(
        &[
            ("dist/alpha/meta.json", r#"{"config": {"code_source": "index.js"}}"#),
            ("dist/alpha/index.js", "console.log(1)"),
        ],
        "extension with code",
    );
    let resolver = ExtensionStore::new();

    let inventory = resolver
        .list_store(&fixture.url(), &Credentials::Anonymous)
        .unwrap();

    // Inventory carries metadata only — no code injection happens here.
    assert_eq!(
        inventory["alpha"],
        json!({"config": {"code_source": "index.js"}})
    );
}
