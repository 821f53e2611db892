//! bcrypt scheme handler.

use bcrypt::Version;

use gatekey_core::error::AppError;

use crate::credential::record;
use crate::credential::rng::RandomnessSource;

use super::{CredentialScheme, SchemeId};

/// Tags produced by historical and current bcrypt variants, all of which
/// remain verifiable.
const TAGS: [&str; 4] = ["2a", "2b", "2x", "2y"];

/// Secrets beyond this many bytes exceed bcrypt's input limit.
pub const MAX_SECRET_BYTES: usize = 72;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;
const SALT_LEN: usize = 16;

/// bcrypt encode/verify keyed by the `2*` family of record tags.
///
/// New records are always emitted in the `2b` revision.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptScheme;

impl CredentialScheme for BcryptScheme {
    fn id(&self) -> SchemeId {
        SchemeId::Bcrypt
    }

    fn recognizes(&self, record: &str) -> bool {
        record::scheme_tag(record)
            .map(|tag| TAGS.contains(&tag))
            .unwrap_or(false)
    }

    fn max_secret_bytes(&self) -> Option<usize> {
        Some(MAX_SECRET_BYTES)
    }

    fn valid_cost(&self, cost: u32) -> bool {
        (MIN_COST..=MAX_COST).contains(&cost)
    }

    fn encode(
        &self,
        secret: &[u8],
        cost: u32,
        rng: &dyn RandomnessSource,
    ) -> Result<String, AppError> {
        let mut salt = [0u8; SALT_LEN];
        rng.fill(&mut salt)?;

        let parts = bcrypt::hash_with_salt(secret, cost, salt)
            .map_err(|e| AppError::internal(format!("bcrypt hashing failed: {e}")))?;
        Ok(parts.format_for_version(Version::TwoB))
    }

    fn verify(&self, secret: &[u8], record: &str) -> Result<bool, AppError> {
        // bcrypt::verify recomputes the digest with the record's own salt
        // and cost and compares in constant time.
        bcrypt::verify(secret, record)
            .map_err(|e| AppError::malformed_record(format!("bcrypt record does not parse: {e}")))
    }

    fn record_cost(&self, record: &str) -> Result<u32, AppError> {
        let fields = record::fields(record)?;
        let cost = fields
            .get(1)
            .ok_or_else(|| AppError::malformed_record("bcrypt record has no cost field"))?;
        cost.parse::<u32>()
            .map_err(|_| AppError::malformed_record(format!("bcrypt cost is not numeric: {cost}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::rng::OsRandomness;

    #[test]
    fn test_encode_emits_2b_records() {
        let scheme = BcryptScheme;
        let record = scheme.encode(b"TestPass123", MIN_COST, &OsRandomness).unwrap();
        assert!(record.starts_with("$2b$04$"));
    }

    #[test]
    fn test_recognizes_all_bcrypt_revisions() {
        let scheme = BcryptScheme;
        for tag in ["2a", "2b", "2x", "2y"] {
            assert!(scheme.recognizes(&format!("${tag}$12$xyz")));
        }
        assert!(!scheme.recognizes("$argon2id$v=19$rest"));
        assert!(!scheme.recognizes("plain"));
    }

    #[test]
    fn test_record_cost_reads_zero_padded_field() {
        let scheme = BcryptScheme;
        let record = scheme.encode(b"TestPass123", MIN_COST, &OsRandomness).unwrap();
        assert_eq!(scheme.record_cost(&record).unwrap(), MIN_COST);
    }

    #[test]
    fn test_cost_range() {
        let scheme = BcryptScheme;
        assert!(scheme.valid_cost(4));
        assert!(scheme.valid_cost(31));
        assert!(!scheme.valid_cost(3));
        assert!(!scheme.valid_cost(32));
    }

    #[test]
    fn test_verify_garbage_record_is_error() {
        let scheme = BcryptScheme;
        assert!(scheme.verify(b"TestPass123", "$2b$12$short").is_err());
    }
}
