//! Credential hashing configuration.

use serde::{Deserialize, Serialize};

/// Credential encoding and verification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Scheme id used for newly encoded credentials.
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Work factor embedded in newly encoded credentials.
    ///
    /// For bcrypt this is the logarithmic cost; cost 12 targets at least
    /// 100ms per call on reference server hardware.
    #[serde(default = "default_cost")]
    pub cost: u32,
    /// Older scheme ids still accepted by verification but no longer
    /// used for encoding.
    #[serde(default = "default_deprecated_schemes")]
    pub deprecated_schemes: Vec<String>,
    /// Policy for secrets above the current scheme's byte ceiling.
    #[serde(default)]
    pub long_secret_policy: LongSecretPolicy,
}

/// What to do with a secret longer than the scheme's byte ceiling
/// (72 bytes for bcrypt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongSecretPolicy {
    /// Fail encoding with an error.
    #[default]
    Reject,
    /// Hash only the bytes up to the ceiling.
    Truncate,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            cost: default_cost(),
            deprecated_schemes: default_deprecated_schemes(),
            long_secret_policy: LongSecretPolicy::default(),
        }
    }
}

fn default_scheme() -> String {
    "bcrypt".to_string()
}

fn default_cost() -> u32 {
    12
}

fn default_deprecated_schemes() -> Vec<String> {
    vec!["argon2id".to_string()]
}
