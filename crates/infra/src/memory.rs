//! In-memory twins of the Postgres repositories.
//!
//! Same observable semantics as `postgres` (tenant-scoped lookups, NotFound
//! on zero matching rows), backed by mutex-guarded collections. Used by the
//! integration tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use taxgate_auth::{
    AdminPrincipal, AdminRepository, EmployeePrincipal, EmployeeRepository, NewSession,
    RepositoryError, Role, RoleRecord, RoleRepository, Session, SessionStore,
};
use taxgate_core::{AdminId, EmployeeId, RoleId, SessionId, TenantId};

#[derive(Default)]
pub struct InMemoryAdminRepository {
    admins: Mutex<Vec<AdminPrincipal>>,
}

impl InMemoryAdminRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, admin: AdminPrincipal) {
        self.admins.lock().unwrap().push(admin);
    }

    pub fn remove(&self, id: AdminId) {
        self.admins.lock().unwrap().retain(|a| a.id != id);
    }
}

#[async_trait]
impl AdminRepository for InMemoryAdminRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminPrincipal>, RepositoryError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: AdminId) -> Result<Option<AdminPrincipal>, RepositoryError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    employees: Mutex<Vec<EmployeePrincipal>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, employee: EmployeePrincipal) {
        self.employees.lock().unwrap().push(employee);
    }

    pub fn remove(&self, id: EmployeeId) {
        self.employees.lock().unwrap().retain(|e| e.id != id);
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmployeePrincipal>, RepositoryError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: EmployeeId,
        tenant_id: TenantId,
    ) -> Result<Option<EmployeePrincipal>, RepositoryError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id && e.tenant_id == tenant_id)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryRoleRepository {
    roles: Mutex<HashMap<RoleId, Role>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: RoleId, role: Role) {
        self.roles.lock().unwrap().insert(id, role);
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<RoleRecord>, RepositoryError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(&id)
            .map(|role| RoleRecord {
                id,
                role_name: role.clone(),
            }))
    }
}

#[derive(Default)]
pub struct InMemorySessionStore {
    rows: Mutex<Vec<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test hook: read a session row by id.
    pub fn get(&self, id: SessionId) -> Option<Session> {
        self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn owned_by(session: &Session, principal_id: Uuid) -> bool {
    session.admin_id.is_some_and(|a| *a.as_uuid() == principal_id)
        || session
            .employee_id
            .is_some_and(|e| *e.as_uuid() == principal_id)
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: NewSession) -> Result<Session, RepositoryError> {
        let row = Session {
            id: SessionId::new(),
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_at: session.expires_at,
            tenant_id: session.tenant_id,
            employee_id: session.employee_id,
            admin_id: session.admin_id,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn find_by_access_token(
        &self,
        access_token: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.access_token == access_token)
            .cloned())
    }

    async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.refresh_token == refresh_token)
            .cloned())
    }

    async fn update_access_token(
        &self,
        id: SessionId,
        access_token: &str,
    ) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|s| s.id == id) {
            Some(session) => {
                session.access_token = access_token.to_string();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete_by_id(
        &self,
        id: SessionId,
        principal_id: Uuid,
        tenant_id: Option<TenantId>,
    ) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| {
            !(s.id == id
                && owned_by(s, principal_id)
                && tenant_id.is_none_or(|t| s.tenant_id == Some(t)))
        });

        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
