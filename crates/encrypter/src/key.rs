//! [`Key`]: the secret key owned by an [`crate::Encrypter`].

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::crypto::CipherConfig;
use crate::error::EncrypterError;
use crate::random::RandomSource;

/// Prefix marking a base64-encoded key string.
pub const BASE64_KEY_PREFIX: &str = "base64:";

/// Secret key bytes.
///
/// The buffer is overwritten with zeroes on drop, and `Debug` never prints
/// the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Key(Box<[u8]>);

impl Key {
    pub fn new(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }

    /// Decode a key from configuration text.
    ///
    /// `base64:<data>` is decoded as standard base64; anything else is taken
    /// as its raw UTF-8 bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EncrypterError::InvalidKeyEncoding`] if the `base64:` form
    /// does not decode.
    pub fn from_encoded(s: &str) -> Result<Self, EncrypterError> {
        match s.strip_prefix(BASE64_KEY_PREFIX) {
            Some(encoded) => STANDARD
                .decode(encoded)
                .map(|bytes| Self(bytes.into_boxed_slice()))
                .map_err(|_| EncrypterError::InvalidKeyEncoding),
            None => Ok(Self::new(s.as_bytes())),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}

/// Generate a fresh random key sized for `config`.
///
/// # Errors
///
/// Returns [`EncrypterError::RandomnessUnavailable`] if `random` fails.
pub fn generate_key(config: &CipherConfig, random: &dyn RandomSource) -> Result<Key, EncrypterError> {
    let mut bytes = vec![0u8; config.key_len()];
    random.fill(&mut bytes)?;
    let key = Key::new(&bytes);
    bytes.iter_mut().for_each(|b| *b = 0);
    Ok(key)
}
