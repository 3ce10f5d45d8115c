//! Payload framing.
//!
//! # Wire format
//!
//! ```text
//! base64( {"iv": base64(iv), "value": base64(ciphertext), "mac": hex(hmac)} )
//! ```
//!
//! Standard base64 alphabet with padding throughout. Field order is not
//! significant and unknown extra fields are ignored.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::EncrypterError;

/// A parsed payload record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// base64 of the IV bytes.
    pub iv: String,
    /// base64 of the ciphertext bytes.
    pub value: String,
    /// Hex HMAC-SHA-256 over `value`.
    pub mac: String,
}

impl Payload {
    /// Encode this record to its transport string.
    ///
    /// # Errors
    ///
    /// Returns [`EncrypterError::MalformedPayload`] if the record cannot be
    /// serialised to JSON.
    pub fn encode(&self) -> Result<String, EncrypterError> {
        let json = serde_json::to_vec(self)
            .map_err(|_| EncrypterError::MalformedPayload("record could not be serialised"))?;
        Ok(STANDARD.encode(json))
    }

    /// Parse a transport string back into a [`Payload`].
    ///
    /// # Errors
    ///
    /// Returns [`EncrypterError::MalformedPayload`] if the outer base64 is
    /// invalid, the JSON does not parse, or any of `iv`/`value`/`mac` is
    /// missing or not a string.
    pub fn decode(s: &str) -> Result<Self, EncrypterError> {
        let json = STANDARD
            .decode(s)
            .map_err(|_| EncrypterError::MalformedPayload("payload is not valid base64"))?;
        serde_json::from_slice(&json).map_err(|_| {
            EncrypterError::MalformedPayload("payload is not a complete {iv, value, mac} record")
        })
    }

    /// Decode the IV, requiring exactly `iv_len` bytes.
    pub(crate) fn iv_bytes(&self, iv_len: usize) -> Result<Vec<u8>, EncrypterError> {
        let iv = STANDARD
            .decode(&self.iv)
            .map_err(|_| EncrypterError::MalformedPayload("iv is not valid base64"))?;
        if iv.len() != iv_len {
            return Err(EncrypterError::MalformedPayload("iv has the wrong length"));
        }
        Ok(iv)
    }

    /// Decode the ciphertext, requiring a non-empty whole number of blocks.
    pub(crate) fn ciphertext_bytes(&self, block_size: usize) -> Result<Vec<u8>, EncrypterError> {
        let ciphertext = STANDARD
            .decode(&self.value)
            .map_err(|_| EncrypterError::MalformedPayload("value is not valid base64"))?;
        if ciphertext.is_empty() || ciphertext.len() % block_size != 0 {
            return Err(EncrypterError::MalformedPayload(
                "value is not a whole number of cipher blocks",
            ));
        }
        Ok(ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Payload {
        Payload {
            iv: STANDARD.encode([1u8; 16]),
            value: STANDARD.encode([2u8; 32]),
            mac: "ab".repeat(32),
        }
    }

    fn encode_json(v: serde_json::Value) -> String {
        STANDARD.encode(v.to_string())
    }

    fn is_malformed<T: std::fmt::Debug>(r: Result<T, EncrypterError>) -> bool {
        matches!(r, Err(EncrypterError::MalformedPayload(_)))
    }

    #[test]
    fn encode_decode_round_trip() {
        let p = sample();
        assert_eq!(Payload::decode(&p.encode().unwrap()).unwrap(), p);
    }

    #[test]
    fn field_order_is_irrelevant() {
        let p = sample();
        let s = encode_json(json!({"mac": p.mac, "value": p.value, "iv": p.iv}));
        assert_eq!(Payload::decode(&s).unwrap(), p);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let p = sample();
        let s = encode_json(json!({"iv": p.iv, "value": p.value, "mac": p.mac, "tag": ""}));
        assert_eq!(Payload::decode(&s).unwrap(), p);
    }

    #[test]
    fn rejects_empty_string() {
        assert!(is_malformed(Payload::decode("")));
    }

    #[test]
    fn rejects_non_base64() {
        assert!(is_malformed(Payload::decode("not base64 at all!")));
    }

    #[test]
    fn rejects_non_record() {
        assert!(is_malformed(Payload::decode(&STANDARD.encode("hello"))));
        assert!(is_malformed(Payload::decode(&encode_json(json!([1, 2, 3])))));
    }

    #[test]
    fn rejects_each_missing_field() {
        let p = sample();
        let full = json!({"iv": p.iv, "value": p.value, "mac": p.mac});
        for field in ["iv", "value", "mac"] {
            let mut partial = full.clone();
            partial.as_object_mut().unwrap().remove(field);
            assert!(is_malformed(Payload::decode(&encode_json(partial))), "{field}");
        }
    }

    #[test]
    fn rejects_null_and_non_string_fields() {
        let p = sample();
        let s = encode_json(json!({"iv": null, "value": p.value, "mac": p.mac}));
        assert!(is_malformed(Payload::decode(&s)));
        let s = encode_json(json!({"iv": p.iv, "value": 12, "mac": p.mac}));
        assert!(is_malformed(Payload::decode(&s)));
    }

    #[test]
    fn iv_length_is_checked() {
        let p = sample();
        assert_eq!(p.iv_bytes(16).unwrap(), vec![1u8; 16]);
        assert!(is_malformed(p.iv_bytes(12)));
    }

    #[test]
    fn ciphertext_must_be_block_aligned() {
        let mut p = sample();
        assert_eq!(p.ciphertext_bytes(16).unwrap().len(), 32);
        p.value = STANDARD.encode([2u8; 20]);
        assert!(is_malformed(p.ciphertext_bytes(16)));
        p.value = String::new();
        assert!(is_malformed(p.ciphertext_bytes(16)));
    }
}
