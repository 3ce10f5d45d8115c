//! Layers shared by every route: request tracing, timeout, body size limit
//! and response compression.

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest accepted request body. Values are encrypted whole, in memory.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Wrap `router` in the standard middleware stack.
pub fn apply<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CompressionLayer::new())
}
