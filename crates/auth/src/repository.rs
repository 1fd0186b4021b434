//! Repository interfaces consumed by the orchestrators.
//!
//! Storage lives behind these traits; `taxgate-infra` provides the Postgres
//! and in-memory implementations. A `None` from the finders means "no such
//! record" and is an authentication failure for callers, never a system
//! error.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use taxgate_core::{AdminId, EmployeeId, RoleId, SessionId, TenantId};

use crate::principal::{AdminPrincipal, EmployeePrincipal};
use crate::roles::Role;
use crate::session::{NewSession, Session};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The targeted row no longer exists (e.g. concurrently logged out).
    #[error("record not found")]
    NotFound,

    /// Storage I/O failure. Callers log this with context and surface a
    /// generic failure to the client.
    #[error("storage failure: {0}")]
    Storage(String),
}

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn find_by_email(&self, email: &str)
        -> Result<Option<AdminPrincipal>, RepositoryError>;

    async fn find_by_id(&self, id: AdminId) -> Result<Option<AdminPrincipal>, RepositoryError>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Global-by-email lookup: an email is assumed unique across tenants at
    /// login time. There is deliberately no tenant parameter here.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmployeePrincipal>, RepositoryError>;

    /// Tenant-scoped lookup used on refresh.
    async fn find_by_id(
        &self,
        id: EmployeeId,
        tenant_id: TenantId,
    ) -> Result<Option<EmployeePrincipal>, RepositoryError>;
}

/// An `id → role name` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    pub id: RoleId,
    pub role_name: Role,
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<RoleRecord>, RepositoryError>;
}

/// The session store. All operations are atomic single-row operations; no
/// multi-row transaction is required by the auth core.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new row. No uniqueness is enforced beyond the primary key;
    /// multiple concurrent sessions per principal are permitted
    /// (multi-device login).
    async fn create(&self, session: NewSession) -> Result<Session, RepositoryError>;

    async fn find_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<Session>, RepositoryError>;

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Session>, RepositoryError>;

    /// Replace the stored access token in place. Fails with
    /// [`RepositoryError::NotFound`] if the row is gone.
    async fn update_access_token(
        &self,
        id: SessionId,
        access_token: &str,
    ) -> Result<(), RepositoryError>;

    /// Remove exactly one row. When `tenant_id` is supplied (employee
    /// logout) the delete is scoped to that tenant so one tenant can never
    /// revoke another tenant's session.
    async fn delete_by_id(
        &self,
        id: SessionId,
        principal_id: Uuid,
        tenant_id: Option<TenantId>,
    ) -> Result<(), RepositoryError>;
}
