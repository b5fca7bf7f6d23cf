//! Deterministic hash encoding for query-shape fingerprints.
//!
//! Every canonical option is fed into one SHA-256 stream with section and
//! variant tags, so any differing option yields a different digest and the
//! same shape always yields the same digest regardless of construction
//! order. The fingerprint never encodes the generation token; the cache
//! layer combines the two.
#![expect(clippy::cast_possible_truncation)]

use crate::db::query::{constraints::IncludeFilter, options::CanonicalOptions};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// Fingerprint
///
/// Digest of one (scopes, canonical options) query shape.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Fingerprint a query shape.
#[must_use]
pub fn fingerprint(scopes: &[String], options: &CanonicalOptions) -> Fingerprint {
    let mut hasher = Sha256::new();

    write_tag(&mut hasher, 0x01);
    hash_scopes(&mut hasher, scopes);

    write_tag(&mut hasher, 0x02);
    write_tag(&mut hasher, options.orderby.tag());
    write_tag(&mut hasher, options.order.tag());

    write_tag(&mut hasher, 0x03);
    write_tag(&mut hasher, u8::from(options.hide_empty));

    write_tag(&mut hasher, 0x04);
    hash_include(&mut hasher, &options.include);

    write_tag(&mut hasher, 0x05);
    write_u32(&mut hasher, options.exclude.len() as u32);
    for id in &options.exclude {
        write_u64(&mut hasher, *id);
    }

    write_tag(&mut hasher, 0x06);
    hash_page(&mut hasher, options.limit, options.offset);

    write_tag(&mut hasher, 0x07);
    write_tag(&mut hasher, options.fields.tag());

    write_tag(&mut hasher, 0x08);
    write_opt_str(&mut hasher, options.search.as_deref());
    write_opt_str(&mut hasher, options.name_like.as_deref());
    write_opt_str(&mut hasher, options.description_like.as_deref());

    Fingerprint(hasher.finalize().into())
}

fn hash_scopes(hasher: &mut Sha256, scopes: &[String]) {
    write_u32(hasher, scopes.len() as u32);
    for scope in scopes {
        write_str(hasher, scope);
    }
}

fn hash_include(hasher: &mut Sha256, include: &IncludeFilter) {
    match include {
        IncludeFilter::Absent => write_tag(hasher, 0x00),
        IncludeFilter::Ids(ids) => {
            write_tag(hasher, 0x01);
            write_u32(hasher, ids.len() as u32);
            for id in ids {
                write_u64(hasher, *id);
            }
        }
        IncludeFilter::MatchNothing => write_tag(hasher, 0x02),
    }
}

fn hash_page(hasher: &mut Sha256, limit: Option<u64>, offset: u64) {
    match limit {
        Some(limit) => {
            write_tag(hasher, 0x01);
            write_u64(hasher, limit);
        }
        None => write_tag(hasher, 0x00),
    }
    write_u64(hasher, offset);
}

/// Encode one optional string into the hash stream.
fn write_opt_str(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(value) => {
            write_tag(hasher, 0x01);
            write_str(hasher, value);
        }
        None => write_tag(hasher, 0x00),
    }
}

/// Encode one string with length prefix into the hash stream.
fn write_str(hasher: &mut Sha256, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

/// Encode one u32 in network byte order into the hash stream.
fn write_u32(hasher: &mut Sha256, value: u32) {
    hasher.update(value.to_be_bytes());
}

/// Encode one u64 in network byte order into the hash stream.
fn write_u64(hasher: &mut Sha256, value: u64) {
    hasher.update(value.to_be_bytes());
}

/// Encode one tag byte into the hash stream.
fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::query::options::QueryOptions;

    fn scopes(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn identical_shapes_hash_identically() {
        let a = QueryOptions::new().number(10).search("bur").normalize();
        let b = QueryOptions::new().search("bur").number(10).normalize();

        assert_eq!(
            fingerprint(&scopes(&["post_tag"]), &a),
            fingerprint(&scopes(&["post_tag"]), &b)
        );
    }

    #[test]
    fn differing_limit_changes_fingerprint() {
        let unbounded = QueryOptions::new().normalize();
        let limited = QueryOptions::new().number(10).normalize();

        assert_ne!(
            fingerprint(&scopes(&["post_tag"]), &unbounded),
            fingerprint(&scopes(&["post_tag"]), &limited)
        );
    }

    #[test]
    fn differing_scopes_change_fingerprint() {
        let options = QueryOptions::new().normalize();

        assert_ne!(
            fingerprint(&scopes(&["post_tag"]), &options),
            fingerprint(&scopes(&["category"]), &options)
        );
        assert_ne!(
            fingerprint(&scopes(&["a", "b"]), &options),
            fingerprint(&scopes(&["ab"]), &options)
        );
    }

    #[test]
    fn include_states_are_distinguished() {
        let absent = QueryOptions::new().normalize();
        let nothing = QueryOptions::new().include(["bogus"]).normalize();
        let ids = QueryOptions::new().include([1_i64]).normalize();

        let scope = scopes(&["post_tag"]);
        let fp_absent = fingerprint(&scope, &absent);
        let fp_nothing = fingerprint(&scope, &nothing);
        let fp_ids = fingerprint(&scope, &ids);

        assert_ne!(fp_absent, fp_nothing);
        assert_ne!(fp_absent, fp_ids);
        assert_ne!(fp_nothing, fp_ids);
    }

    #[test]
    fn display_is_lowercase_hex() {
        let fp = fingerprint(&scopes(&["post_tag"]), &QueryOptions::new().normalize());
        let rendered = fp.to_string();

        assert_eq!(rendered.len(), 64);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(rendered, rendered.to_lowercase());
    }
}
