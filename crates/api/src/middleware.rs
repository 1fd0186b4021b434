use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use taxgate_auth::{TokenCodec, TokenKind};

use crate::context::{BearerToken, PrincipalContext};

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<TokenCodec>,
}

/// Verify the bearer access token and attach the principal context.
///
/// Signature/expiry verification only; session-store validation belongs to
/// the orchestrators behind the handler.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?.to_string();

    let claims = state
        .codec
        .verify(&token, TokenKind::Access)
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut()
        .insert(PrincipalContext::from_claims(&claims));
    req.extensions_mut().insert(BearerToken(token));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
