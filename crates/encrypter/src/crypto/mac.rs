//! HMAC-SHA-256 tags over the transport-encoded ciphertext.
//!
//! The tag is computed over the base64 *string* of the ciphertext, not the
//! raw bytes, and rendered as lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::cipher::CipherError;
use crate::error::EncrypterError;

type HmacSha256 = Hmac<Sha256>;

fn keyed(key: &[u8]) -> Result<HmacSha256, CipherError> {
    <HmacSha256 as Mac>::new_from_slice(key).map_err(|_| CipherError::InvalidKeyOrIv)
}

/// Compute the hex-encoded tag for `data` under `key`.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyOrIv`] if HMAC rejects the key, which
/// does not happen for any key length HMAC-SHA-256 accepts.
pub fn sign(key: &[u8], data: &str) -> Result<String, CipherError> {
    let mut mac = keyed(key)?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check `tag_hex` against the tag for `data` in constant time.
///
/// # Errors
///
/// Returns [`EncrypterError::AuthenticationFailed`] if the tag does not match
/// or is not lowercase hex.
pub fn verify(key: &[u8], data: &str, tag_hex: &str) -> Result<(), EncrypterError> {
    // Only the canonical lowercase form is accepted, so every distinct tag
    // string maps to distinct bytes.
    if !tag_hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
        return Err(EncrypterError::AuthenticationFailed);
    }
    let tag = hex::decode(tag_hex).map_err(|_| EncrypterError::AuthenticationFailed)?;
    let mut mac = keyed(key)?;
    mac.update(data.as_bytes());
    mac.verify_slice(&tag)
        .map_err(|_| EncrypterError::AuthenticationFailed)
}
