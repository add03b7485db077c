//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{path}`  - Short link redirect
//! - `GET  /health`    - Health check: database and audit queue
//!
//! Every route is wrapped in the request tracing layer. Paths are matched
//! as received; no trailing-slash normalization is applied. The redirect route
//! answers GET only; other methods get 405 and are not logged.

use crate::api::handlers::{health_handler, redirect_handler, redirect_head_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/r/{path}",
            get(redirect_handler).head(redirect_head_handler),
        )
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}
