//! Axum request handlers for all service endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{
        DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, ErrorResponse,
        HealthResponse,
    },
    ServiceError,
};
use encrypter::EncrypterError;
use tracing::{debug, warn};

use super::state::AppState;

/// `POST /encrypt` — encrypt an arbitrary JSON value into a payload string.
pub async fn encrypt(State(state): State<AppState>, Json(req): Json<EncryptRequest>) -> Response {
    match state.encrypter.encrypt(&req.value) {
        Ok(payload) => (StatusCode::OK, Json(EncryptResponse { payload })).into_response(),
        Err(e) => {
            warn!(kind = e.kind(), "encryption failed");
            error_response(&encrypt_error(&e))
        }
    }
}

/// `POST /decrypt` — authenticate and decrypt a payload string.
///
/// Malformed payloads are a `400`. Authentication, padding and codec
/// failures all produce the same `422` body.
pub async fn decrypt(State(state): State<AppState>, Json(req): Json<DecryptRequest>) -> Response {
    match state.encrypter.decrypt(&req.payload) {
        Ok(value) => (StatusCode::OK, Json(DecryptResponse { value })).into_response(),
        Err(e) => {
            debug!(kind = e.kind(), "payload rejected");
            error_response(&decrypt_error(&e))
        }
    }
}

/// `GET /health` — liveness check reporting the configured cipher.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        cipher: state.encrypter.config().to_string(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn encrypt_error(e: &EncrypterError) -> ServiceError {
    match e {
        EncrypterError::Codec(_) => ServiceError::BadRequest("value could not be encoded".into()),
        _ => ServiceError::EncryptionFailure("encryption failed".into()),
    }
}

fn decrypt_error(e: &EncrypterError) -> ServiceError {
    match e {
        EncrypterError::MalformedPayload(reason) => ServiceError::BadRequest((*reason).into()),
        EncrypterError::AuthenticationFailed
        | EncrypterError::InvalidPadding
        | EncrypterError::Codec(_) => ServiceError::Undecryptable,
        _ => ServiceError::Internal("decryption failed".into()),
    }
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}
