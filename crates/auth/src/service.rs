//! Public surface of the auth core: `sign_in`, `refresh`, `logout`.
//!
//! Bundles the three orchestrators over one set of collaborators. The HTTP
//! layer maps results into the uniform [`Envelope`](crate::Envelope) shape;
//! every `AuthError` display string is already public-safe.

use std::sync::Arc;

use taxgate_core::TenantId;

use crate::error::AuthError;
use crate::logout::Logout;
use crate::password::CredentialVerifier;
use crate::refresh::{Refresh, RefreshOutcome};
use crate::repository::{AdminRepository, EmployeeRepository, RoleRepository, SessionStore};
use crate::signin::{SignIn, SignInOutcome, SignInRequest};
use crate::token::TokenCodec;

pub struct AuthService {
    sign_in: SignIn,
    refresh: Refresh,
    logout: Logout,
}

impl AuthService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        employees: Arc<dyn EmployeeRepository>,
        roles: Arc<dyn RoleRepository>,
        sessions: Arc<dyn SessionStore>,
        verifier: Arc<dyn CredentialVerifier>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            sign_in: SignIn::new(
                Arc::clone(&admins),
                Arc::clone(&employees),
                Arc::clone(&roles),
                Arc::clone(&sessions),
                verifier,
                Arc::clone(&codec),
            ),
            refresh: Refresh::new(
                Arc::clone(&sessions),
                admins,
                employees,
                roles,
                codec,
            ),
            logout: Logout::new(sessions),
        }
    }

    pub async fn sign_in(&self, request: SignInRequest) -> Result<SignInOutcome, AuthError> {
        self.sign_in.execute(request).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshOutcome, AuthError> {
        self.refresh.execute(refresh_token).await
    }

    pub async fn logout(
        &self,
        access_token: &str,
        tenant_id: Option<TenantId>,
    ) -> Result<(), AuthError> {
        self.logout.execute(access_token, tenant_id).await
    }
}
