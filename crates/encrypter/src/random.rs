//! Source of IV and key bytes.

use rand::{rngs::OsRng, RngCore};
use thiserror::Error;

/// The random source could not produce bytes.
#[derive(Debug, Error)]
#[error("random source failed: {0}")]
pub struct RandomnessError(pub String);

/// Cryptographically secure byte source.
///
/// Failures must be reported, never papered over with a weaker source.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomnessError>;
}

/// Operating-system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomnessError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| RandomnessError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_random_fills_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsRandom.fill(&mut a).unwrap();
        OsRandom.fill(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn error_display_includes_cause() {
        let e = RandomnessError("entropy pool exhausted".into());
        assert!(e.to_string().contains("entropy pool exhausted"));
    }
}
