//! Value codecs: turn application values into the bytes that get encrypted.
//!
//! Codecs are limited to well-defined data shapes. None of them can run
//! arbitrary code while deserialising.

use std::{fmt, marker::PhantomData};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// A codec failed to serialise or deserialise a value.
#[derive(Debug, Error)]
#[error("value codec failed: {0}")]
pub struct CodecError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl CodecError {
    /// Wrap any error raised by a codec.
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

/// Converts values to and from bytes around encryption.
pub trait ValueCodec {
    /// The application value type.
    type Value;

    /// Convert `value` into bytes.
    fn serialize(&self, value: &Self::Value) -> Result<Vec<u8>, CodecError>;

    /// Rebuild a value from bytes produced by [`ValueCodec::serialize`].
    fn deserialize(&self, bytes: &[u8]) -> Result<Self::Value, CodecError>;
}

/// JSON codec for any serde type.
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JsonCodec")
    }
}

impl<T: Serialize + DeserializeOwned> ValueCodec for JsonCodec<T> {
    type Value = T;

    fn serialize(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(CodecError::new)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(CodecError::new)
    }
}

/// UTF-8 strings, encrypted as their bytes with no framing.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl ValueCodec for StringCodec {
    type Value = String;

    fn serialize(&self, value: &String) -> Result<Vec<u8>, CodecError> {
        Ok(value.as_bytes().to_vec())
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<String, CodecError> {
        String::from_utf8(bytes.to_vec()).map_err(CodecError::new)
    }
}

/// Identity codec for raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesCodec;

impl ValueCodec for BytesCodec {
    type Value = Vec<u8>;

    fn serialize(&self, value: &Vec<u8>) -> Result<Vec<u8>, CodecError> {
        Ok(value.clone())
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Session {
        user_id: u64,
        roles: Vec<String>,
    }

    #[test]
    fn json_codec_struct_round_trip() {
        let codec = JsonCodec::<Session>::new();
        let session = Session {
            user_id: 7,
            roles: vec!["admin".into()],
        };
        let bytes = codec.serialize(&session).unwrap();
        assert_eq!(codec.deserialize(&bytes).unwrap(), session);
    }

    #[test]
    fn json_codec_value_round_trip() {
        let codec = JsonCodec::<serde_json::Value>::new();
        let value = json!({"a": [1, 2.5, null], "b": {"c": "d"}});
        let bytes = codec.serialize(&value).unwrap();
        assert_eq!(codec.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn json_codec_rejects_wrong_shape() {
        let codec = JsonCodec::<Session>::new();
        let err = codec.deserialize(br#"{"user_id":"nope"}"#).unwrap_err();
        assert!(err.to_string().starts_with("value codec failed"));
    }

    #[test]
    fn string_codec_rejects_invalid_utf8() {
        assert!(StringCodec.deserialize(&[0xff, 0xfe]).is_err());
        assert_eq!(StringCodec.deserialize(b"hello").unwrap(), "hello");
    }

    #[test]
    fn bytes_codec_is_identity() {
        let data = vec![0u8, 1, 255];
        assert_eq!(BytesCodec.serialize(&data).unwrap(), data);
        assert_eq!(BytesCodec.deserialize(&data).unwrap(), data);
    }
}
