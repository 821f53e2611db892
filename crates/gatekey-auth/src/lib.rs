//! # gatekey-auth
//!
//! Credential encoding and verification for the Gatekey platform.
//!
//! ## Modules
//!
//! - `credential` — salted one-way credential encoding, scheme dispatch,
//!   and the randomness abstraction

pub mod credential;

pub use credential::{CredentialHasher, FixedRandomness, OsRandomness, RandomnessSource, SchemeId};
