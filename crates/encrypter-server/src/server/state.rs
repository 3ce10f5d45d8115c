//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use encrypter::{Encrypter, JsonCodec};

/// The encrypter type served over HTTP: arbitrary JSON values.
pub type JsonEncrypter = Encrypter<JsonCodec<serde_json::Value>>;

/// Application state shared across all request handlers.
///
/// Cloning is cheap: the encrypter is `Arc`-wrapped and immutable, so
/// concurrent handlers share it without locking.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The single encrypter holding the configured key.
    pub encrypter: Arc<JsonEncrypter>,
}

impl AppState {
    /// Create a new [`AppState`] around `encrypter`.
    pub fn new(encrypter: JsonEncrypter) -> Self {
        Self {
            encrypter: Arc::new(encrypter),
        }
    }
}
