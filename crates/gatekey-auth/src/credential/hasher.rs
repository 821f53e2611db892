//! Credential encoding and verification with scheme dispatch.

use std::str::FromStr;
use std::sync::Arc;

use tracing::warn;

use gatekey_core::config::credential::{CredentialConfig, LongSecretPolicy};
use gatekey_core::error::AppError;

use super::record;
use super::rng::{OsRandomness, RandomnessSource};
use super::scheme::{self, CredentialScheme, SchemeId};

/// Encodes plaintext secrets into self-describing credential records and
/// checks claimed secrets against them.
///
/// Both operations are pure, CPU-bound, and synchronous; a hasher holds
/// only construction-time configuration and is safe to share across any
/// number of concurrent callers behind an `Arc`. The deliberate per-call
/// expense is the security property; latency-sensitive callers should
/// run it off their dispatch path rather than lower the cost.
#[derive(Clone)]
pub struct CredentialHasher {
    /// Scheme used for newly encoded credentials.
    current: Arc<dyn CredentialScheme>,
    /// Schemes accepted during verification, current one first.
    accepted: Vec<Arc<dyn CredentialScheme>>,
    /// Work factor for newly encoded credentials.
    cost: u32,
    /// Policy for secrets above a scheme's byte ceiling.
    long_secret_policy: LongSecretPolicy,
    /// Salt byte source.
    rng: Arc<dyn RandomnessSource>,
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("current", &self.current.id())
            .field("cost", &self.cost)
            .field("long_secret_policy", &self.long_secret_policy)
            .finish()
    }
}

impl CredentialHasher {
    /// Creates a hasher wired to the operating-system randomness source.
    pub fn new(config: &CredentialConfig) -> Result<Self, AppError> {
        Self::with_randomness(config, Arc::new(OsRandomness))
    }

    /// Creates a hasher with an explicit randomness source.
    ///
    /// Production callers should prefer [`CredentialHasher::new`]; this
    /// constructor exists so tests can substitute a deterministic source.
    pub fn with_randomness(
        config: &CredentialConfig,
        rng: Arc<dyn RandomnessSource>,
    ) -> Result<Self, AppError> {
        let current = scheme::builtin(SchemeId::from_str(&config.scheme)?);
        if !current.valid_cost(config.cost) {
            return Err(AppError::configuration(format!(
                "cost {} is outside the supported range for scheme {}",
                config.cost,
                current.id()
            )));
        }

        let mut accepted = vec![Arc::clone(&current)];
        for name in &config.deprecated_schemes {
            let id = SchemeId::from_str(name)?;
            if accepted.iter().all(|s| s.id() != id) {
                accepted.push(scheme::builtin(id));
            }
        }

        Ok(Self {
            current,
            accepted,
            cost: config.cost,
            long_secret_policy: config.long_secret_policy,
            rng,
        })
    }

    /// Encodes `secret` into a self-describing credential record.
    ///
    /// Every call draws a fresh salt, so two encodings of the same secret
    /// never produce the same record, yet both verify. The output is an
    /// opaque printable string in the `$<tag>$<cost>$...` form; stores
    /// must persist it verbatim.
    ///
    /// Secrets above the current scheme's byte ceiling (72 bytes for
    /// bcrypt) fail with an `Encoding` error under the default `reject`
    /// policy; the `truncate` policy hashes only the leading bytes.
    pub fn encode(&self, secret: &str) -> Result<String, AppError> {
        let bytes = self.bound_secret(secret.as_bytes())?;
        self.current.encode(bytes, self.cost, self.rng.as_ref())
    }

    /// Checks `secret` against a previously encoded `record`.
    ///
    /// Dispatches on the scheme tag embedded in the record, so records
    /// encoded under an older cost or a deprecated scheme keep verifying
    /// with their own embedded parameters. Returns `Ok(false)` on any
    /// mismatch; a record that does not parse as an accepted encoding is
    /// a `MalformedRecord` error, never a plain `false`.
    pub fn verify(&self, secret: &str, record: &str) -> Result<bool, AppError> {
        let handler = self.dispatch(record)?;

        let bytes = secret.as_bytes();
        if let Some(max) = handler.max_secret_bytes() {
            if bytes.len() > max {
                return match self.long_secret_policy {
                    // Over-ceiling secrets are never encoded under this
                    // policy, so no record can match them; comparing the
                    // truncated prefix would accept candidates that differ
                    // past the ceiling.
                    LongSecretPolicy::Reject => Ok(false),
                    LongSecretPolicy::Truncate => handler.verify(&bytes[..max], record),
                };
            }
        }
        handler.verify(bytes, record)
    }

    /// Reports whether `record` should be re-encoded under the current
    /// configuration: its scheme is no longer the current one, or its
    /// embedded work factor is below the configured one.
    ///
    /// Re-encoding is the caller's move, typically right after a
    /// successful [`verify`](Self::verify) while the plaintext is still
    /// at hand; the hasher never rehashes on its own.
    pub fn needs_update(&self, record: &str) -> Result<bool, AppError> {
        let handler = self.dispatch(record)?;
        if handler.id() != self.current.id() {
            return Ok(true);
        }
        Ok(handler.record_cost(record)? < self.cost)
    }

    fn dispatch(&self, record: &str) -> Result<&Arc<dyn CredentialScheme>, AppError> {
        match self.accepted.iter().find(|s| s.recognizes(record)) {
            Some(handler) => Ok(handler),
            None => {
                let tag = record::scheme_tag(record).unwrap_or("<none>");
                warn!(tag, "credential record does not carry an accepted scheme tag");
                Err(AppError::malformed_record(format!(
                    "record tag {tag:?} is not an accepted credential encoding"
                )))
            }
        }
    }

    fn bound_secret<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8], AppError> {
        match self.current.max_secret_bytes() {
            Some(max) if bytes.len() > max => match self.long_secret_policy {
                LongSecretPolicy::Reject => Err(AppError::encoding(format!(
                    "secret is {} bytes; scheme {} accepts at most {max}",
                    bytes.len(),
                    self.current.id()
                ))),
                LongSecretPolicy::Truncate => Ok(&bytes[..max]),
            },
            _ => Ok(bytes),
        }
    }
}
