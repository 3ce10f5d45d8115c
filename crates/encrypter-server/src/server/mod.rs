//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Map [`encrypter::EncrypterError`] onto HTTP errors without leaking which
//!   check a rejected payload failed.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
