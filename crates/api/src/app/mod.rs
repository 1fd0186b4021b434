//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repository/orchestrator wiring over the Postgres pool
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON mapping
//! - `errors.rs`: consistent envelope error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use taxgate_auth::TokenCodec;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::Services>, codec: Arc<TokenCodec>) -> Router {
    let auth_state = middleware::AuthState { codec };

    // Logout requires a verified bearer token; sign-in and refresh do not.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public_router())
        .merge(protected)
        .layer(Extension(services))
}
