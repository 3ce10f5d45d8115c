//! Structured logging setup.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext or payloads** may appear in any log field.
//!   Decrypt failures are logged by error kind only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), overridden
//!   by `RUST_LOG` when set.

pub mod init;

pub use init::init_telemetry;
