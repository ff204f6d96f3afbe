use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use super::errors::JwtError;

/// Symmetric HS256 secret used both to sign and to verify tokens.
///
/// Constructed once at startup and handed to the [`JwtHandler`](super::JwtHandler);
/// there is no global key. A generated key lives only as long as the process,
/// so a restart invalidates every token signed with it.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Minimum secret length accepted for HS256 (256 bits).
    pub const MIN_LENGTH: usize = 32;

    /// Generate a fresh random key from the operating system CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; Self::MIN_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Use caller-provided secret material, e.g. from configuration.
    ///
    /// # Errors
    /// * `KeyTooShort` - Secret is shorter than [`Self::MIN_LENGTH`] bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, JwtError> {
        let bytes = bytes.into();
        if bytes.len() < Self::MIN_LENGTH {
            return Err(JwtError::KeyTooShort {
                min: Self::MIN_LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}
