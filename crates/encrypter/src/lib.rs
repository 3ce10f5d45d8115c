//! Symmetric authenticated encryption of application values.
//!
//! An [`Encrypter`] owns one secret key and an immutable [`CipherConfig`].
//! `encrypt` turns a value into a self-contained payload string:
//!
//! ```text
//! codec → PKCS#7 pad → AES-CBC → base64 → HMAC-SHA-256 → JSON {iv, value, mac} → base64
//! ```
//!
//! `decrypt` reverses it, verifying the MAC before any ciphertext is touched.
//!
//! ```
//! use encrypter::{CipherConfig, Encrypter, JsonCodec};
//!
//! let enc = Encrypter::new(&[0u8; 32], CipherConfig::aes_256_cbc(), JsonCodec::<String>::new())?;
//! let payload = enc.encrypt(&"hello".to_owned())?;
//! assert_eq!(enc.decrypt(&payload)?, "hello");
//! # Ok::<(), encrypter::EncrypterError>(())
//! ```
//!
//! # Security invariants
//!
//! - Key material is never printed, logged or serialised.
//! - A fresh random IV is drawn for every encryption; a failing random
//!   source is an error, never a fallback.
//! - Unauthenticated ciphertext is never decrypted.

pub mod codec;
pub mod crypto;
pub mod encrypter;
pub mod error;
pub mod key;
pub mod payload;
pub mod random;

pub use codec::{BytesCodec, CodecError, JsonCodec, StringCodec, ValueCodec};
pub use crypto::{mac, padding, Algorithm, CipherConfig, CipherError, Mode};
pub use encrypter::Encrypter;
pub use error::EncrypterError;
pub use key::{generate_key, Key};
pub use payload::Payload;
pub use random::{OsRandom, RandomSource, RandomnessError};
