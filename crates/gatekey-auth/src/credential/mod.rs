//! Salted one-way credential encoding and verification.

pub mod hasher;
pub mod record;
pub mod rng;
pub mod scheme;

pub use hasher::CredentialHasher;
pub use rng::{FixedRandomness, OsRandomness, RandomnessSource};
pub use scheme::{CredentialScheme, SchemeId};
