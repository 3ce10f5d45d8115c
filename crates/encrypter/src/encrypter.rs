//! [`Encrypter`]: encrypt-then-MAC pipeline over a value codec.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::codec::ValueCodec;
use crate::crypto::{mac, padding, AesCbc, CipherBackend, CipherConfig};
use crate::error::EncrypterError;
use crate::key::Key;
use crate::payload::Payload;
use crate::random::{OsRandom, RandomSource};

/// Encrypts values into self-contained, tamper-evident payload strings and
/// decrypts them again.
///
/// Key and configuration are fixed at construction. Every method takes
/// `&self`, so one instance can be shared across threads behind an `Arc`.
pub struct Encrypter<C> {
    key: Key,
    config: CipherConfig,
    codec: C,
    random: Box<dyn RandomSource>,
    backend: Box<dyn CipherBackend>,
}

impl<C> Encrypter<C> {
    /// Create an encrypter backed by AES-CBC and the OS random source.
    ///
    /// # Errors
    ///
    /// Returns [`EncrypterError::InvalidKeyLength`] if `key` does not match
    /// `config.key_len()`.
    pub fn new(key: &[u8], config: CipherConfig, codec: C) -> Result<Self, EncrypterError> {
        Self::with_parts(
            key,
            config,
            codec,
            Box::new(OsRandom),
            Box::new(AesCbc::new(&config)),
        )
    }

    /// Create an encrypter with a custom random source and cipher backend.
    ///
    /// # Errors
    ///
    /// Returns [`EncrypterError::InvalidKeyLength`] if `key` does not match
    /// `config.key_len()`.
    pub fn with_parts(
        key: &[u8],
        config: CipherConfig,
        codec: C,
        random: Box<dyn RandomSource>,
        backend: Box<dyn CipherBackend>,
    ) -> Result<Self, EncrypterError> {
        if !Self::supported(key, &config) {
            return Err(EncrypterError::InvalidKeyLength {
                expected: config.key_len(),
                actual: key.len(),
            });
        }
        Ok(Self {
            key: Key::new(key),
            config,
            codec,
            random,
            backend,
        })
    }

    /// Whether `key` can be used with `config`.
    pub fn supported(key: &[u8], config: &CipherConfig) -> bool {
        key.len() == config.key_len()
    }

    pub fn config(&self) -> &CipherConfig {
        &self.config
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Encrypt raw bytes into a payload string, bypassing the codec.
    ///
    /// # Errors
    ///
    /// Returns [`EncrypterError::RandomnessUnavailable`] if no IV can be
    /// generated, or [`EncrypterError::Cipher`] if the backend fails.
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<String, EncrypterError> {
        let mut iv = vec![0u8; self.config.iv_len()];
        self.random.fill(&mut iv)?;

        let padded = padding::pad(plaintext, self.config.block_size());
        let ciphertext = self.backend.encrypt(self.key.as_bytes(), &iv, &padded)?;

        let value = STANDARD.encode(ciphertext);
        let mac = mac::sign(self.key.as_bytes(), &value)?;

        Payload {
            iv: STANDARD.encode(&iv),
            value,
            mac,
        }
        .encode()
    }

    /// Decrypt a payload string into raw bytes, bypassing the codec.
    ///
    /// The MAC is verified before the IV or ciphertext are even decoded.
    ///
    /// # Errors
    ///
    /// - [`EncrypterError::MalformedPayload`] if the payload cannot be parsed.
    /// - [`EncrypterError::AuthenticationFailed`] if the MAC does not match.
    /// - [`EncrypterError::InvalidPadding`] if the plaintext padding is bad.
    pub fn decrypt_bytes(&self, payload: &str) -> Result<Vec<u8>, EncrypterError> {
        let payload = Payload::decode(payload)?;
        mac::verify(self.key.as_bytes(), &payload.value, &payload.mac)?;

        let iv = payload.iv_bytes(self.config.iv_len())?;
        let ciphertext = payload.ciphertext_bytes(self.config.block_size())?;

        let padded = self.backend.decrypt(self.key.as_bytes(), &iv, &ciphertext)?;
        let plaintext = padding::unpad(&padded, self.config.block_size())?;
        Ok(plaintext.to_vec())
    }
}

impl<C: ValueCodec> Encrypter<C> {
    /// Serialise `value` with the codec and encrypt it.
    ///
    /// Two calls with the same value yield different payloads.
    ///
    /// # Errors
    ///
    /// Returns [`EncrypterError::Codec`] if serialisation fails, plus every
    /// error [`Encrypter::encrypt_bytes`] can return.
    pub fn encrypt(&self, value: &C::Value) -> Result<String, EncrypterError> {
        let bytes = self.codec.serialize(value)?;
        self.encrypt_bytes(&bytes)
    }

    /// Authenticate and decrypt `payload`, then deserialise it with the codec.
    ///
    /// # Errors
    ///
    /// Returns every error [`Encrypter::decrypt_bytes`] can return, plus
    /// [`EncrypterError::Codec`] if deserialisation fails.
    pub fn decrypt(&self, payload: &str) -> Result<C::Value, EncrypterError> {
        let bytes = self.decrypt_bytes(payload)?;
        Ok(self.codec.deserialize(&bytes)?)
    }
}

impl<C> std::fmt::Debug for Encrypter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encrypter")
            .field("key", &self.key)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
