//! Shared HTTP protocol types and errors for the encrypter service.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
