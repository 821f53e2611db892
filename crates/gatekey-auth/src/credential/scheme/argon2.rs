//! Argon2id scheme handler.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString},
};

use gatekey_core::error::AppError;

use crate::credential::record;
use crate::credential::rng::RandomnessSource;

use super::{CredentialScheme, SchemeId};

const TAG: &str = "argon2id";

/// Memory cost in KiB for newly encoded records (19 MiB, single lane).
const MEMORY_KIB: u32 = 19 * 1024;
const LANES: u32 = 1;
const SALT_LEN: usize = 16;

/// Argon2id encode/verify in PHC string format.
///
/// The configured cost maps to the iteration count `t`; memory and lane
/// count stay fixed, and verification always honors the parameters
/// embedded in the record itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2idScheme;

impl Argon2idScheme {
    fn instance(&self, cost: u32) -> Result<Argon2<'static>, AppError> {
        let params = Params::new(MEMORY_KIB, cost, LANES, None)
            .map_err(|e| AppError::configuration(format!("invalid Argon2 parameters: {e}")))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl CredentialScheme for Argon2idScheme {
    fn id(&self) -> SchemeId {
        SchemeId::Argon2id
    }

    fn recognizes(&self, record: &str) -> bool {
        record::scheme_tag(record)
            .map(|tag| tag == TAG)
            .unwrap_or(false)
    }

    fn max_secret_bytes(&self) -> Option<usize> {
        None
    }

    fn valid_cost(&self, cost: u32) -> bool {
        cost >= 1
    }

    fn encode(
        &self,
        secret: &[u8],
        cost: u32,
        rng: &dyn RandomnessSource,
    ) -> Result<String, AppError> {
        let mut salt_bytes = [0u8; SALT_LEN];
        rng.fill(&mut salt_bytes)?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AppError::internal(format!("salt encoding failed: {e}")))?;

        let hash = self
            .instance(cost)?
            .hash_password(secret, &salt)
            .map_err(|e| AppError::internal(format!("Argon2 hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, secret: &[u8], record: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(record)
            .map_err(|e| AppError::malformed_record(format!("Argon2 record does not parse: {e}")))?;

        // verify_password recomputes the digest with the record's own
        // parameters and compares in constant time.
        match Argon2::default().verify_password(secret, &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::malformed_record(format!(
                "Argon2 record rejected: {e}"
            ))),
        }
    }

    fn record_cost(&self, record: &str) -> Result<u32, AppError> {
        // The parameter field looks like `m=19456,t=2,p=1`.
        let fields = record::fields(record)?;
        let params = fields
            .get(2)
            .ok_or_else(|| AppError::malformed_record("Argon2 record has no parameter field"))?;
        for pair in params.split(',') {
            if let Some(t) = pair.strip_prefix("t=") {
                return t.parse::<u32>().map_err(|_| {
                    AppError::malformed_record(format!("Argon2 time cost is not numeric: {t}"))
                });
            }
        }
        Err(AppError::malformed_record(
            "Argon2 record has no t parameter",
        ))
    }
}
