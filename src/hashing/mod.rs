//! BLAKE3-derived keys for caches and identifiers.

use blake3::Hasher;
use uuid::Uuid;

/// 32-byte key identifying one explanation in the cache.
pub type ExplanationKey = [u8; 32];

/// Derives the explanation cache key for a `(organization, program)` pair.
///
/// The prompt version is part of the key, so bumping it invalidates every
/// previously cached explanation without a manual purge.
#[inline]
pub fn explanation_key(
    organization_id: Uuid,
    program_id: Uuid,
    prompt_version: &str,
) -> ExplanationKey {
    let mut hasher = Hasher::new();
    hasher.update(organization_id.as_bytes());
    hasher.update(b"|");
    hasher.update(program_id.as_bytes());
    hasher.update(b"|");
    hasher.update(prompt_version.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Short hex form of a key for structured log fields.
pub fn key_fingerprint(key: &ExplanationKey) -> String {
    key[..6].iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (Uuid, Uuid) {
        (
            Uuid::from_u128(0x1111_2222_3333_4444_5555_6666_7777_8888),
            Uuid::from_u128(0x9999_aaaa_bbbb_cccc_dddd_eeee_ffff_0000),
        )
    }

    #[test]
    fn test_explanation_key_determinism() {
        let (org, program) = ids();

        let key1 = explanation_key(org, program, "v1");
        let key2 = explanation_key(org, program, "v1");

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_explanation_key_prompt_version_sensitivity() {
        let (org, program) = ids();

        let v1 = explanation_key(org, program, "v1");
        let v2 = explanation_key(org, program, "v2");

        assert_ne!(v1, v2);
    }

    #[test]
    fn test_explanation_key_is_ordered_pair() {
        let (org, program) = ids();

        let forward = explanation_key(org, program, "v1");
        let reversed = explanation_key(program, org, "v1");

        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_key_fingerprint_is_short_hex() {
        let (org, program) = ids();
        let fingerprint = key_fingerprint(&explanation_key(org, program, "v1"));

        assert_eq!(fingerprint.len(), 12);
        assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
