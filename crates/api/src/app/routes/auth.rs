//! Authentication handlers: sign-in (both principal kinds), refresh, logout.

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use taxgate_auth::{Envelope, PrincipalKind, SignInRequest};

use crate::app::dto::{LoginRequest, LogoutRequest, RefreshRequest};
use crate::app::errors::auth_error_response;
use crate::app::services::Services;
use crate::context::BearerToken;

async fn sign_in(
    services: &Services,
    body: LoginRequest,
    kind: PrincipalKind,
) -> Response {
    let request = SignInRequest {
        email: body.email,
        password: body.password,
        kind,
    };

    match services.auth.sign_in(request).await {
        Ok(outcome) => Json(Envelope::success("Login successful", outcome)).into_response(),
        Err(e) => auth_error_response(e),
    }
}

pub async fn admin_login(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    sign_in(&services, body, PrincipalKind::Admin).await
}

pub async fn employee_login(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    sign_in(&services, body, PrincipalKind::Employee).await
}

pub async fn refresh(
    Extension(services): Extension<Arc<Services>>,
    Json(body): Json<RefreshRequest>,
) -> Response {
    match services.auth.refresh(&body.refresh_token).await {
        Ok(outcome) => {
            Json(Envelope::success("New access token generated", outcome)).into_response()
        }
        Err(e) => auth_error_response(e),
    }
}

pub async fn logout(
    Extension(services): Extension<Arc<Services>>,
    Extension(BearerToken(access_token)): Extension<BearerToken>,
    body: Option<Json<LogoutRequest>>,
) -> Response {
    let tenant_id = body.and_then(|Json(b)| b.company_id);

    match services.auth.logout(&access_token, tenant_id).await {
        Ok(()) => Json(Envelope::<()>::success_empty("Logged out successfully")).into_response(),
        Err(e) => auth_error_response(e),
    }
}
