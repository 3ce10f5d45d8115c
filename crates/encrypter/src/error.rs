//! Error type returned by every [`crate::Encrypter`] operation.

use thiserror::Error;

use crate::codec::CodecError;
use crate::crypto::CipherError;
use crate::random::RandomnessError;

/// Errors produced while encrypting or decrypting a value.
///
/// Messages never include key material, plaintext or payload contents.
#[derive(Debug, Error)]
pub enum EncrypterError {
    /// The key does not match the configured cipher's key size.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// An encoded key string could not be decoded.
    #[error("invalid key encoding")]
    InvalidKeyEncoding,

    /// The random source failed while generating an IV or key.
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(#[from] RandomnessError),

    /// The payload is not a decodable, complete `{iv, value, mac}` record.
    #[error("malformed payload: {0}")]
    MalformedPayload(&'static str),

    /// The payload's MAC does not match its ciphertext.
    #[error("message authentication code invalid")]
    AuthenticationFailed,

    /// The decrypted plaintext carries invalid PKCS#7 padding.
    #[error("invalid padding")]
    InvalidPadding,

    /// The block cipher rejected its input.
    #[error("cipher failure: {0}")]
    Cipher(#[from] CipherError),

    /// The value codec failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl EncrypterError {
    /// Short machine-readable name of the error kind, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            EncrypterError::InvalidKeyLength { .. } => "invalid_key_length",
            EncrypterError::InvalidKeyEncoding => "invalid_key_encoding",
            EncrypterError::RandomnessUnavailable(_) => "randomness_unavailable",
            EncrypterError::MalformedPayload(_) => "malformed_payload",
            EncrypterError::AuthenticationFailed => "authentication_failed",
            EncrypterError::InvalidPadding => "invalid_padding",
            EncrypterError::Cipher(_) => "cipher_failure",
            EncrypterError::Codec(_) => "codec_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_length_message() {
        let e = EncrypterError::InvalidKeyLength {
            expected: 32,
            actual: 16,
        };
        assert_eq!(e.to_string(), "invalid key length: expected 32 bytes, got 16");
    }

    #[test]
    fn kinds_are_distinct() {
        assert_eq!(EncrypterError::AuthenticationFailed.kind(), "authentication_failed");
        assert_eq!(EncrypterError::InvalidPadding.kind(), "invalid_padding");
        assert_eq!(
            EncrypterError::MalformedPayload("x").kind(),
            "malformed_payload"
        );
    }

    #[test]
    fn codec_error_is_transparent() {
        let e: EncrypterError = CodecError::new("bad shape").into();
        assert_eq!(e.to_string(), "value codec failed: bad shape");
    }
}
