//! Postgres-backed repositories.
//!
//! Every employee-scoped query carries `tenant_id` in its WHERE clause so a
//! lookup can never cross the tenant boundary. SQLx errors are logged with
//! the failing operation and mapped to [`RepositoryError::Storage`];
//! "zero rows affected" on update/delete maps to
//! [`RepositoryError::NotFound`].

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use taxgate_auth::{
    AdminPrincipal, AdminRepository, EmployeePrincipal, EmployeeRepository, NewSession,
    RepositoryError, Role, RoleRecord, RoleRepository, Session, SessionStore,
};
use taxgate_core::{AdminId, EmployeeId, RoleId, SessionId, TenantId};

fn map_sqlx_error(operation: &'static str, e: sqlx::Error) -> RepositoryError {
    error!(operation, error = %e, "database error");
    RepositoryError::Storage(e.to_string())
}

fn admin_from_row(row: &PgRow) -> Result<AdminPrincipal, sqlx::Error> {
    Ok(AdminPrincipal {
        id: AdminId::from_uuid(row.try_get("id")?),
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        full_name: row.try_get("full_name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn employee_from_row(row: &PgRow) -> Result<EmployeePrincipal, sqlx::Error> {
    Ok(EmployeePrincipal {
        id: EmployeeId::from_uuid(row.try_get("id")?),
        tenant_id: TenantId::from_uuid(row.try_get("tenant_id")?),
        role_id: row
            .try_get::<Option<Uuid>, _>("role_id")?
            .map(RoleId::from_uuid),
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        phone: row.try_get("phone")?,
        is_active: row.try_get("is_active")?,
        status_id: row.try_get("status_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn session_from_row(row: &PgRow) -> Result<Session, sqlx::Error> {
    Ok(Session {
        id: SessionId::from_uuid(row.try_get("id")?),
        access_token: row.try_get("access_token")?,
        refresh_token: row.try_get("refresh_token")?,
        expires_at: row.try_get("expires_at")?,
        tenant_id: row
            .try_get::<Option<Uuid>, _>("tenant_id")?
            .map(TenantId::from_uuid),
        employee_id: row
            .try_get::<Option<Uuid>, _>("employee_id")?
            .map(EmployeeId::from_uuid),
        admin_id: row
            .try_get::<Option<Uuid>, _>("admin_id")?
            .map(AdminId::from_uuid),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Admins
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PgAdminRepository {
    pool: Arc<PgPool>,
}

impl PgAdminRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const ADMIN_COLUMNS: &str =
    "id, email, password_hash, full_name, created_at, updated_at";

#[async_trait]
impl AdminRepository for PgAdminRepository {
    #[instrument(skip(self))]
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminPrincipal>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("admins.find_by_email", e))?;

        row.as_ref()
            .map(admin_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("admins.find_by_email", e))
    }

    #[instrument(skip(self), fields(admin_id = %id))]
    async fn find_by_id(&self, id: AdminId) -> Result<Option<AdminPrincipal>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("admins.find_by_id", e))?;

        row.as_ref()
            .map(admin_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("admins.find_by_id", e))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Employees
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PgEmployeeRepository {
    pool: Arc<PgPool>,
}

impl PgEmployeeRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const EMPLOYEE_COLUMNS: &str = "id, tenant_id, role_id, email, password_hash, first_name, \
     last_name, phone, is_active, status_id, created_at, updated_at";

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    #[instrument(skip(self))]
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmployeePrincipal>, RepositoryError> {
        // Login lookup is deliberately global: email is assumed unique
        // across tenants.
        let row = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("employees.find_by_email", e))?;

        row.as_ref()
            .map(employee_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("employees.find_by_email", e))
    }

    #[instrument(skip(self), fields(employee_id = %id, tenant_id = %tenant_id))]
    async fn find_by_id(
        &self,
        id: EmployeeId,
        tenant_id: TenantId,
    ) -> Result<Option<EmployeePrincipal>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1 AND tenant_id = $2"
        ))
        .bind(id.as_uuid())
        .bind(tenant_id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("employees.find_by_id", e))?;

        row.as_ref()
            .map(employee_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("employees.find_by_id", e))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Roles
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PgRoleRepository {
    pool: Arc<PgPool>,
}

impl PgRoleRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    #[instrument(skip(self), fields(role_id = %id))]
    async fn find_by_id(&self, id: RoleId) -> Result<Option<RoleRecord>, RepositoryError> {
        let row = sqlx::query("SELECT id, role_name FROM roles WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("roles.find_by_id", e))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let role_name: String = row
            .try_get("role_name")
            .map_err(|e| map_sqlx_error("roles.find_by_id", e))?;

        Ok(Some(RoleRecord {
            id,
            role_name: Role::new(role_name),
        }))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: Arc<PgPool>,
}

impl PgSessionStore {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

const SESSION_COLUMNS: &str =
    "id, access_token, refresh_token, expires_at, tenant_id, employee_id, admin_id";

#[async_trait]
impl SessionStore for PgSessionStore {
    #[instrument(skip(self, session))]
    async fn create(&self, session: NewSession) -> Result<Session, RepositoryError> {
        let id = SessionId::new();

        sqlx::query(
            r#"
            INSERT INTO sessions
                (id, access_token, refresh_token, expires_at, tenant_id, employee_id, admin_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&session.access_token)
        .bind(&session.refresh_token)
        .bind(session.expires_at)
        .bind(session.tenant_id.map(|t| *t.as_uuid()))
        .bind(session.employee_id.map(|e| *e.as_uuid()))
        .bind(session.admin_id.map(|a| *a.as_uuid()))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("sessions.create", e))?;

        Ok(Session {
            id,
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_at: session.expires_at,
            tenant_id: session.tenant_id,
            employee_id: session.employee_id,
            admin_id: session.admin_id,
        })
    }

    #[instrument(skip(self, access_token))]
    async fn find_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE access_token = $1"
        ))
        .bind(access_token)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("sessions.find_by_access_token", e))?;

        row.as_ref()
            .map(session_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("sessions.find_by_access_token", e))
    }

    #[instrument(skip(self, refresh_token))]
    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE refresh_token = $1"
        ))
        .bind(refresh_token)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("sessions.find_by_refresh_token", e))?;

        row.as_ref()
            .map(session_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("sessions.find_by_refresh_token", e))
    }

    #[instrument(skip(self, access_token), fields(session_id = %id))]
    async fn update_access_token(
        &self,
        id: SessionId,
        access_token: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE sessions SET access_token = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(access_token)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("sessions.update_access_token", e))?;

        if result.rows_affected() == 0 {
            warn!(session_id = %id, "access token update targeted a missing session");
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    // TODO: fold the employee availability-flag update into the same
    // statement/transaction once its intended semantics are settled; until
    // then only the token-delete guarantee is provided.
    #[instrument(skip(self), fields(session_id = %id, principal_id = %principal_id))]
    async fn delete_by_id(
        &self,
        id: SessionId,
        principal_id: Uuid,
        tenant_id: Option<TenantId>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE id = $1
              AND (admin_id = $2 OR employee_id = $2)
              AND ($3::uuid IS NULL OR tenant_id = $3)
            "#,
        )
        .bind(id.as_uuid())
        .bind(principal_id)
        .bind(tenant_id.map(|t| *t.as_uuid()))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("sessions.delete_by_id", e))?;

        if result.rows_affected() == 0 {
            warn!(session_id = %id, "attempted to delete a non-matching session");
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
