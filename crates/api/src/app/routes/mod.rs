use axum::Router;
use axum::routing::post;

pub mod auth;
pub mod system;

/// Routes reachable without a bearer token.
pub fn public_router() -> Router {
    Router::new()
        .route("/admin/auth/login", post(auth::admin_login))
        .route("/employee/auth/login", post(auth::employee_login))
        .route("/auth/refresh", post(auth::refresh))
}

/// Routes behind the bearer-token middleware.
pub fn protected_router() -> Router {
    Router::new().route("/auth/logout", post(auth::logout))
}
