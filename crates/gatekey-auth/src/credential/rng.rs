//! Randomness sources for salt generation.

use rand::TryRng;
use rand::rngs::SysRng;

use gatekey_core::error::AppError;

/// Source of cryptographically secure random bytes for salt generation.
///
/// Salt generation depends on a process-wide secure random source in most
/// runtimes. Abstracting it behind this trait lets tests substitute a
/// deterministic source while production always wires [`OsRandomness`].
pub trait RandomnessSource: Send + Sync + std::fmt::Debug {
    /// Fills `buf` with random bytes.
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError>;
}

/// Operating-system CSPRNG. The only source suitable for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomness;

impl RandomnessSource for OsRandomness {
    /// A failure here is a fatal security-configuration condition; it is
    /// never retried and never falls back to weaker randomness.
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError> {
        SysRng
            .try_fill_bytes(buf)
            .map_err(|e| AppError::randomness(format!("OS randomness source failed: {e}")))
    }
}

/// Deterministic source that cycles over a fixed byte pattern.
///
/// Test-only substitute for [`OsRandomness`]; never wire this in
/// production paths.
#[derive(Debug, Clone)]
pub struct FixedRandomness {
    bytes: Vec<u8>,
}

impl FixedRandomness {
    /// Creates a source that repeats `bytes` for every fill.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl RandomnessSource for FixedRandomness {
    fn fill(&self, buf: &mut [u8]) -> Result<(), AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::randomness(
                "fixed randomness source has no bytes",
            ));
        }
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.bytes[i % self.bytes.len()];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_randomness_fills_distinct_buffers() {
        let source = OsRandomness;
        let mut first = [0u8; 16];
        let mut second = [0u8; 16];
        source.fill(&mut first).unwrap();
        source.fill(&mut second).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_fixed_randomness_cycles_pattern() {
        let source = FixedRandomness::new([1u8, 2, 3]);
        let mut buf = [0u8; 7];
        source.fill(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn test_fixed_randomness_empty_pattern_fails() {
        let source = FixedRandomness::new(Vec::new());
        let mut buf = [0u8; 4];
        assert!(source.fill(&mut buf).is_err());
    }
}
