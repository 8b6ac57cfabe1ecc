//! Semver filtering and ordering of raw tag names.

use store_git::TAG_REF_PREFIX;

/// Filter raw tag refs to well-formed versions under `prefix`, sorted
/// strictly descending by semver precedence.
///
/// Each raw name may carry the `refs/tags/` transport prefix. After
/// stripping it, the name must be exactly `<prefix><semver>`: a tag with
/// trailing path segments fails the semver parse and is rejected, as is
/// any unrelated tag. Malformed tags are discarded silently; a store may
/// contain tags that have nothing to do with extensions. Build metadata
/// participates in parsing but not in ordering, per semver precedence.
pub fn matching_versions(prefix: &str, raw_tags: &[String]) -> Vec<semver::Version> {
    let mut versions: Vec<semver::Version> = raw_tags
        .iter()
        .filter_map(|raw| {
            let name = raw.strip_prefix(TAG_REF_PREFIX).unwrap_or(raw);
            let literal = name.strip_prefix(prefix)?;
            semver::Version::parse(literal).ok()
        })
        .collect();
    // cmp_precedence, not Ord: Ord breaks ties on build metadata, which
    // semver precedence ignores.
    versions.sort_unstable_by(|a, b| b.cmp_precedence(a));
    versions
}
