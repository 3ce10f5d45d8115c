//! Configuration loading and validation for the encrypter service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use encrypter::{CipherConfig, Key};
use serde::Deserialize;

/// Validated service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Encryption key, `base64:`-prefixed or raw text. **Required.**
    pub app_key: String,

    /// Cipher name: `aes-128-cbc` or `aes-256-cbc`.
    #[serde(default = "default_cipher")]
    pub cipher: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_cipher() -> String {
    "aes-256-cbc".into()
}
fn default_listen_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Parsed cipher configuration.
    pub fn cipher_config(&self) -> Result<CipherConfig> {
        self.cipher
            .parse::<CipherConfig>()
            .with_context(|| format!("CIPHER {:?} is not supported", self.cipher))
    }

    /// Decoded key bytes.
    pub fn key(&self) -> Result<Key> {
        Key::from_encoded(&self.app_key).context("APP_KEY could not be decoded")
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.app_key.trim().is_empty() {
            anyhow::bail!("APP_KEY is required and must not be empty");
        }
        let cipher = self.cipher_config()?;
        let key = self.key()?;
        if key.len() != cipher.key_len() {
            anyhow::bail!(
                "APP_KEY must be {} bytes for {cipher}, got {}",
                cipher.key_len(),
                key.len()
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_key", &"[REDACTED]")
            .field("cipher", &self.cipher)
            .field("listen_port", &self.listen_port)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_KEY_B64: &str = "base64:AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    fn config(app_key: &str, cipher: &str) -> Config {
        Config {
            app_key: app_key.into(),
            cipher: cipher.into(),
            listen_port: default_listen_port(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_cipher(), "aes-256-cbc");
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_base64_key() {
        assert!(config(ZERO_KEY_B64, "aes-256-cbc").validate().is_ok());
    }

    #[test]
    fn validate_accepts_raw_aes_128_key() {
        assert!(config("0123456789abcdef", "aes-128-cbc").validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_key() {
        assert!(config("  ", "aes-256-cbc").validate().is_err());
    }

    #[test]
    fn validate_rejects_key_cipher_mismatch() {
        let err = config(ZERO_KEY_B64, "aes-128-cbc").validate().unwrap_err();
        assert!(err.to_string().contains("16 bytes"));
    }

    #[test]
    fn validate_rejects_unknown_cipher() {
        assert!(config(ZERO_KEY_B64, "rijndael-256-ctr").validate().is_err());
    }

    #[test]
    fn validate_rejects_undecodable_key() {
        assert!(config("base64:***", "aes-256-cbc").validate().is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let printed = format!("{:?}", config(ZERO_KEY_B64, "aes-256-cbc"));
        assert!(!printed.contains("AAAA"));
        assert!(printed.contains("REDACTED"));
    }
}
