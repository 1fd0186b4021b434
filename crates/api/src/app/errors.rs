use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use taxgate_auth::{AuthError, Envelope};

/// Map an auth failure to its HTTP status with an envelope body.
///
/// `AuthError` display strings are public-safe by construction; internal
/// detail was already logged where the error originated.
pub fn auth_error_response(err: AuthError) -> Response {
    let status = match err {
        AuthError::InvalidCredentials
        | AuthError::InvalidAccessToken
        | AuthError::InvalidRefreshToken
        | AuthError::PrincipalNotFound => StatusCode::UNAUTHORIZED,
        AuthError::AuthenticationFailed | AuthError::LogoutFailed => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(Envelope::<()>::failure(err.to_string()))).into_response()
}
