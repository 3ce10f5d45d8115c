//! Axum router construction.

use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState) -> Router {
    let routes = Router::new()
        .route("/encrypt", post(handlers::encrypt))
        .route("/decrypt", post(handlers::decrypt))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found);
    middleware::apply(routes).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use common::protocol::{DecryptResponse, EncryptResponse, ErrorResponse};
    use encrypter::{CipherConfig, Encrypter, JsonCodec};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let encrypter =
            Encrypter::new(&[0u8; 32], CipherConfig::aes_256_cbc(), JsonCodec::new()).unwrap();
        build(AppState::new(encrypter))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(resp: Response) -> T {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn encrypt(app: &Router, value: Value) -> String {
        let resp = app
            .clone()
            .oneshot(post_json("/encrypt", json!({ "value": value })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        body_json::<EncryptResponse>(resp).await.payload
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let req = Request::builder()
            .uri("/unknown")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let err: ErrorResponse = body_json(resp).await;
        assert_eq!(err.code, "not_found");
    }

    #[tokio::test]
    async fn health_reports_cipher() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["cipher"], "aes-256-cbc");
    }

    #[tokio::test]
    async fn encrypt_then_decrypt_round_trip() {
        let app = app();
        let value = json!({"ssn": "123-45-6789", "tags": [1, 2, 3]});
        let payload = encrypt(&app, value.clone()).await;

        let resp = app
            .oneshot(post_json("/decrypt", json!({ "payload": payload })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: DecryptResponse = body_json(resp).await;
        assert_eq!(body.value, value);
    }

    #[tokio::test]
    async fn malformed_payload_is_400() {
        let resp = app()
            .oneshot(post_json("/decrypt", json!({ "payload": "not a payload" })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: ErrorResponse = body_json(resp).await;
        assert_eq!(err.code, "bad_request");
    }

    #[tokio::test]
    async fn payload_from_other_key_is_422() {
        let other = Encrypter::new(&[7u8; 32], CipherConfig::aes_256_cbc(), JsonCodec::new())
            .unwrap();
        let payload = other.encrypt(&json!("secret")).unwrap();

        let resp = app()
            .oneshot(post_json("/decrypt", json!({ "payload": payload })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let err: ErrorResponse = body_json(resp).await;
        assert_eq!(err.code, "undecryptable");
    }

    #[tokio::test]
    async fn missing_body_field_is_rejected() {
        let resp = app()
            .oneshot(post_json("/decrypt", json!({ "nope": 1 })))
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    }
}
