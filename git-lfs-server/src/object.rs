//! Content addressing of LFS objects inside the backing store.

use crate::error::InvalidOid;

/// Maps an oid onto its storage key, `oid[0:2]/oid[2:4]/oid`.
///
/// Nesting by hash prefix spreads keys across the store's partitions
/// instead of piling them into one flat namespace.
pub fn sharded_key(oid: &str) -> Result<String, InvalidOid> {
    match (oid.get(0..2), oid.get(2..4)) {
        (Some(first), Some(second)) => Ok(format!("{}/{}/{}", first, second, oid)),
        _ => Err(InvalidOid(oid.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const OID: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn sharded_key_nests_by_prefix() {
        assert_eq!(
            sharded_key(OID).unwrap(),
            format!("b9/4d/{}", OID),
        );
        assert_eq!(sharded_key("12345").unwrap(), "12/34/12345");
    }

    #[test]
    fn sharded_key_accepts_exactly_four_characters() {
        assert_eq!(sharded_key("abcd").unwrap(), "ab/cd/abcd");
    }

    #[test]
    fn sharded_key_is_deterministic() {
        for oid in ["abcd", "54321", "an-oid", OID] {
            let key = sharded_key(oid).unwrap();
            assert_eq!(key, sharded_key(oid).unwrap());
            assert_eq!(key, format!("{}/{}/{}", &oid[0..2], &oid[2..4], oid));
        }
    }

    #[test]
    fn sharded_key_rejects_short_oids() {
        for oid in ["", "a", "abc"] {
            assert_eq!(sharded_key(oid), Err(InvalidOid(oid.to_string())));
        }
    }

    #[test]
    fn sharded_key_rejects_oids_not_splitting_on_char_boundaries() {
        assert!(sharded_key("\u{e9}bcdef").is_ok());
        assert!(sharded_key("a\u{e9}cdef").is_err());
    }
}
