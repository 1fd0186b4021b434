//! Sign-in orchestrator.
//!
//! Resolves the principal table from the requested kind, verifies
//! credentials, resolves a role label (employees only), mints a token pair
//! and persists the session row.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::claims::TokenSubject;
use crate::error::AuthError;
use crate::password::CredentialVerifier;
use crate::principal::{Principal, PrincipalKind, PrincipalSummary};
use crate::repository::{AdminRepository, EmployeeRepository, RoleRepository, SessionStore};
use crate::roles::Role;
use crate::session::NewSession;
use crate::token::TokenCodec;

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub kind: PrincipalKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInOutcome {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: PrincipalSummary,
}

pub struct SignIn {
    admins: Arc<dyn AdminRepository>,
    employees: Arc<dyn EmployeeRepository>,
    roles: Arc<dyn RoleRepository>,
    sessions: Arc<dyn SessionStore>,
    verifier: Arc<dyn CredentialVerifier>,
    codec: Arc<TokenCodec>,
}

impl SignIn {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        employees: Arc<dyn EmployeeRepository>,
        roles: Arc<dyn RoleRepository>,
        sessions: Arc<dyn SessionStore>,
        verifier: Arc<dyn CredentialVerifier>,
        codec: Arc<TokenCodec>,
    ) -> Self {
        Self {
            admins,
            employees,
            roles,
            sessions,
            verifier,
            codec,
        }
    }

    pub async fn execute(&self, request: SignInRequest) -> Result<SignInOutcome, AuthError> {
        info!(email = %request.email, kind = ?request.kind, "sign-in attempt");

        let principal = self.lookup_principal(&request).await?;

        // Unknown email and wrong password must be indistinguishable.
        let Some(principal) = principal else {
            warn!(email = %request.email, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        };
        let matches = self
            .verifier
            .compare(&request.password, principal.password_hash())
            .map_err(|e| {
                error!(email = %request.email, error = %e, "credential verifier failed");
                AuthError::AuthenticationFailed
            })?;
        if !matches {
            warn!(email = %request.email, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let role = self.resolve_role(&principal).await?;

        let subject = TokenSubject::of(&principal, role.clone());
        let pair = self.codec.issue_pair(&subject).map_err(|e| {
            error!(email = %request.email, error = %e, "token issuance failed");
            AuthError::AuthenticationFailed
        })?;

        let session = match &principal {
            Principal::Admin(admin) => NewSession::for_admin(
                admin.id,
                pair.access_token.clone(),
                pair.refresh_token.clone(),
                pair.expires_at,
            ),
            Principal::Employee(employee) => NewSession::for_employee(
                employee.id,
                employee.tenant_id,
                pair.access_token.clone(),
                pair.refresh_token.clone(),
                pair.expires_at,
            ),
        };
        self.sessions.create(session).await.map_err(|e| {
            error!(email = %request.email, error = %e, "failed to persist session");
            AuthError::AuthenticationFailed
        })?;

        info!(principal_id = %principal.id(), "login successful");

        Ok(SignInOutcome {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_at: pair.expires_at,
            user: PrincipalSummary::of(&principal, role),
        })
    }

    async fn lookup_principal(
        &self,
        request: &SignInRequest,
    ) -> Result<Option<Principal>, AuthError> {
        let found = match request.kind {
            PrincipalKind::Admin => self
                .admins
                .find_by_email(&request.email)
                .await
                .map(|admin| admin.map(Principal::Admin)),
            // Email is assumed globally unique across tenants at login time;
            // there is no tenant disambiguation here.
            PrincipalKind::Employee => self
                .employees
                .find_by_email(&request.email)
                .await
                .map(|employee| employee.map(Principal::Employee)),
        };

        found.map_err(|e| {
            error!(email = %request.email, error = %e, "principal lookup failed");
            AuthError::AuthenticationFailed
        })
    }

    /// Admins carry the fixed super role; employees resolve theirs lazily,
    /// and a missing role id simply leaves the label absent.
    async fn resolve_role(&self, principal: &Principal) -> Result<Option<Role>, AuthError> {
        let employee = match principal {
            Principal::Admin(_) => return Ok(Some(Role::super_admin())),
            Principal::Employee(employee) => employee,
        };
        let Some(role_id) = employee.role_id else {
            return Ok(None);
        };

        let record = self.roles.find_by_id(role_id).await.map_err(|e| {
            error!(employee_id = %employee.id, error = %e, "role lookup failed");
            AuthError::AuthenticationFailed
        })?;

        Ok(record.map(|r| r.role_name))
    }
}
