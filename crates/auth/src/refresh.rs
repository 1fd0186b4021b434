//! Refresh orchestrator.
//!
//! Re-validates the session by refresh token, re-fetches the live principal
//! (never trusting stale claims), mints a new access token, and rewrites the
//! session's access token in place. The refresh token itself is not rotated;
//! it stays valid until its own expiry or explicit logout.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use crate::claims::TokenSubject;
use crate::error::AuthError;
use crate::principal::Principal;
use crate::repository::{AdminRepository, EmployeeRepository, RoleRepository, SessionStore};
use crate::roles::Role;
use crate::session::{Session, SessionOwner};
use crate::token::TokenCodec;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshOutcome {
    pub access_token: String,
}

pub struct Refresh {
    sessions: Arc<dyn SessionStore>,
    admins: Arc<dyn AdminRepository>,
    employees: Arc<dyn EmployeeRepository>,
    roles: Arc<dyn RoleRepository>,
    codec: Arc<TokenCodec>,
}

impl Refresh {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        admins: Arc<dyn AdminRepository>,
        employees: Arc<dyn EmployeeRepository>,
        roles: Arc<dyn RoleRepository>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            sessions,
            admins,
            employees,
            roles,
            codec,
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> Result<RefreshOutcome, AuthError> {
        info!("refresh token request received");

        let session = self
            .sessions
            .find_by_refresh_token(refresh_token)
            .await
            .map_err(|e| {
                error!(error = %e, "session lookup failed");
                AuthError::AuthenticationFailed
            })?;
        let Some(session) = session else {
            warn!("invalid refresh token attempt");
            return Err(AuthError::InvalidRefreshToken);
        };

        let Some(owner) = session.owner() else {
            warn!(session_id = %session.id, "session row has no principal linkage");
            return Err(AuthError::InvalidRefreshToken);
        };

        let subject = match self.resolve_subject(&session, owner).await {
            Ok(subject) => subject,
            Err(AuthError::PrincipalNotFound) => {
                // Principal deleted or deactivated since last login.
                warn!(session_id = %session.id, "no principal found for refresh token");
                return Err(AuthError::InvalidRefreshToken);
            }
            Err(other) => return Err(other),
        };

        let access_token = self.codec.issue_access_token(&subject).map_err(|e| {
            error!(session_id = %session.id, error = %e, "token issuance failed");
            AuthError::AuthenticationFailed
        })?;

        match self
            .sessions
            .update_access_token(session.id, &access_token)
            .await
        {
            Ok(()) => {}
            Err(crate::RepositoryError::NotFound) => {
                // Session revoked between lookup and rewrite.
                warn!(session_id = %session.id, "session disappeared during refresh");
                return Err(AuthError::InvalidRefreshToken);
            }
            Err(e) => {
                error!(session_id = %session.id, error = %e, "failed to rewrite access token");
                return Err(AuthError::AuthenticationFailed);
            }
        }

        info!(principal_id = %subject.id, "new access token issued");

        Ok(RefreshOutcome { access_token })
    }

    /// Re-fetch the live principal and re-resolve its role label exactly as
    /// at sign-in.
    async fn resolve_subject(
        &self,
        session: &Session,
        owner: SessionOwner,
    ) -> Result<TokenSubject, AuthError> {
        match owner {
            SessionOwner::Admin(admin_id) => {
                let admin = self
                    .admins
                    .find_by_id(admin_id)
                    .await
                    .map_err(|e| {
                        error!(admin_id = %admin_id, error = %e, "admin lookup failed");
                        AuthError::AuthenticationFailed
                    })?
                    .ok_or(AuthError::PrincipalNotFound)?;

                Ok(TokenSubject::of(
                    &Principal::Admin(admin),
                    Some(Role::super_admin()),
                ))
            }
            SessionOwner::Employee(employee_id) => {
                let Some(tenant_id) = session.tenant_id else {
                    warn!(session_id = %session.id, "employee session is missing its tenant");
                    return Err(AuthError::InvalidRefreshToken);
                };

                let employee = self
                    .employees
                    .find_by_id(employee_id, tenant_id)
                    .await
                    .map_err(|e| {
                        error!(employee_id = %employee_id, error = %e, "employee lookup failed");
                        AuthError::AuthenticationFailed
                    })?
                    .ok_or(AuthError::PrincipalNotFound)?;

                let role = match employee.role_id {
                    Some(role_id) => self
                        .roles
                        .find_by_id(role_id)
                        .await
                        .map_err(|e| {
                            error!(employee_id = %employee_id, error = %e, "role lookup failed");
                            AuthError::AuthenticationFailed
                        })?
                        .map(|r| r.role_name),
                    None => None,
                };

                Ok(TokenSubject::of(&Principal::Employee(employee), role))
            }
        }
    }
}
