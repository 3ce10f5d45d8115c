//! Cryptographic primitives: AES-CBC block backend, PKCS#7 padding and
//! HMAC-SHA-256 tags.
//!
//! This module knows nothing about payload framing or value codecs. It
//! provides the building blocks [`crate::Encrypter`] composes into an
//! encrypt-then-MAC pipeline.

pub mod cipher;
pub mod mac;
pub mod padding;

pub use cipher::{AesCbc, Algorithm, CipherBackend, CipherConfig, CipherError, Mode};
