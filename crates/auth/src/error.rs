//! Error taxonomy of the auth core.
//!
//! Every message on this enum is public-safe: unknown email and wrong
//! password share one variant, and storage failures are logged at the point
//! of conversion before being collapsed into the generic variants.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Bad email or password; the two causes are intentionally
    /// indistinguishable to prevent account enumeration.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Token or session resolved but the backing principal row is gone.
    /// Surfaced to callers as an authorization failure, never with detail.
    #[error("Principal no longer exists")]
    PrincipalNotFound,

    /// Unexpected persistence or lookup error during sign-in/refresh; full
    /// context is logged server-side before this is returned.
    #[error("Failed to login, try again later.")]
    AuthenticationFailed,

    #[error("Logout failed, please try again later.")]
    LogoutFailed,
}
