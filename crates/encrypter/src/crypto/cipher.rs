//! Cipher configuration and the AES-CBC block backend.
//!
//! **Algorithm choice:** AES in CBC mode, authenticated separately with
//! HMAC-SHA-256 in an encrypt-then-MAC construction (see [`super::mac`]).
//! The backend works on whole blocks only; PKCS#7 padding is applied and
//! removed by [`super::padding`] so that padding failures surface as a
//! distinct, deterministic error after authentication.

use std::{fmt, str::FromStr};

use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use thiserror::Error;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Byte length of an AES block, for every key size.
pub const AES_BLOCK_LEN: usize = 16;

/// Errors produced by the cipher layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The key or IV handed to the block cipher has the wrong length.
    #[error("invalid key or IV length for the configured cipher")]
    InvalidKeyOrIv,

    /// The input is not a whole number of cipher blocks.
    #[error("input of {0} bytes is not a multiple of the block size")]
    UnalignedInput(usize),

    /// The cipher name is not one of the supported configurations.
    #[error("unsupported cipher: {0}")]
    Unsupported(String),
}

/// Block cipher algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// AES with a 128-bit key.
    Aes128,
    /// AES with a 256-bit key.
    Aes256,
}

impl Algorithm {
    /// Required key length in bytes.
    pub const fn key_len(self) -> usize {
        match self {
            Algorithm::Aes128 => 16,
            Algorithm::Aes256 => 32,
        }
    }

    /// Block length in bytes.
    pub const fn block_len(self) -> usize {
        AES_BLOCK_LEN
    }
}

/// Block chaining mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Cipher Block Chaining; the IV is one block long.
    Cbc,
}

/// Immutable cipher configuration: algorithm, mode and block size.
///
/// Fixed when an [`crate::Encrypter`] is constructed. Independent encrypters
/// may use different configurations side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CipherConfig {
    algorithm: Algorithm,
    mode: Mode,
    block_size: usize,
}

impl CipherConfig {
    /// Build a configuration for `algorithm` in `mode`.
    pub const fn new(algorithm: Algorithm, mode: Mode) -> Self {
        Self {
            algorithm,
            mode,
            block_size: algorithm.block_len(),
        }
    }

    /// AES-128 in CBC mode.
    pub const fn aes_128_cbc() -> Self {
        Self::new(Algorithm::Aes128, Mode::Cbc)
    }

    /// AES-256 in CBC mode.
    pub const fn aes_256_cbc() -> Self {
        Self::new(Algorithm::Aes256, Mode::Cbc)
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Padding granularity in bytes.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Key length the algorithm requires.
    pub const fn key_len(&self) -> usize {
        self.algorithm.key_len()
    }

    /// IV length the mode requires.
    pub const fn iv_len(&self) -> usize {
        match self.mode {
            Mode::Cbc => self.block_size,
        }
    }
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self::aes_256_cbc()
    }
}

impl fmt::Display for CipherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let algorithm = match self.algorithm {
            Algorithm::Aes128 => "aes-128",
            Algorithm::Aes256 => "aes-256",
        };
        let mode = match self.mode {
            Mode::Cbc => "cbc",
        };
        write!(f, "{algorithm}-{mode}")
    }
}

impl FromStr for CipherConfig {
    type Err = CipherError;

    /// Parse `"aes-128-cbc"` or `"aes-256-cbc"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-128-cbc" => Ok(Self::aes_128_cbc()),
            "aes-256-cbc" => Ok(Self::aes_256_cbc()),
            _ => Err(CipherError::Unsupported(s.to_owned())),
        }
    }
}

/// Raw block encryption seam used by [`crate::Encrypter`].
///
/// Implementations encrypt already-padded plaintext and decrypt back to the
/// still-padded plaintext; they never add or strip padding themselves.
#[cfg_attr(test, mockall::automock)]
pub trait CipherBackend: Send + Sync {
    /// Encrypt `padded`, whose length is a multiple of the block size.
    fn encrypt(&self, key: &[u8], iv: &[u8], padded: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Decrypt `ciphertext`, whose length is a multiple of the block size.
    fn decrypt(&self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError>;
}

/// AES-CBC backend for the key size named in the configuration.
#[derive(Debug, Clone, Copy)]
pub struct AesCbc {
    algorithm: Algorithm,
}

impl AesCbc {
    pub fn new(config: &CipherConfig) -> Self {
        Self {
            algorithm: config.algorithm(),
        }
    }
}

impl CipherBackend for AesCbc {
    fn encrypt(&self, key: &[u8], iv: &[u8], padded: &[u8]) -> Result<Vec<u8>, CipherError> {
        if padded.len() % AES_BLOCK_LEN != 0 {
            return Err(CipherError::UnalignedInput(padded.len()));
        }
        let ciphertext = match self.algorithm {
            Algorithm::Aes128 => Aes128CbcEnc::new_from_slices(key, iv)
                .map_err(|_| CipherError::InvalidKeyOrIv)?
                .encrypt_padded_vec_mut::<NoPadding>(padded),
            Algorithm::Aes256 => Aes256CbcEnc::new_from_slices(key, iv)
                .map_err(|_| CipherError::InvalidKeyOrIv)?
                .encrypt_padded_vec_mut::<NoPadding>(padded),
        };
        Ok(ciphertext)
    }

    fn decrypt(&self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let unaligned = || CipherError::UnalignedInput(ciphertext.len());
        match self.algorithm {
            Algorithm::Aes128 => Aes128CbcDec::new_from_slices(key, iv)
                .map_err(|_| CipherError::InvalidKeyOrIv)?
                .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
                .map_err(|_| unaligned()),
            Algorithm::Aes256 => Aes256CbcDec::new_from_slices(key, iv)
                .map_err(|_| CipherError::InvalidKeyOrIv)?
                .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
                .map_err(|_| unaligned()),
        }
    }
}
