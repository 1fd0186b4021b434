//! Server-side session records.
//!
//! One row per active login. The session store exclusively owns these rows;
//! orchestrators never mutate them except through the store's single-row
//! operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taxgate_core::{AdminId, EmployeeId, SessionId, TenantId};

/// The principal a session belongs to.
///
/// Exactly one of the admin/employee columns is set on a well-formed row;
/// resolution yields `None` only for corrupt data.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionOwner {
    Admin(AdminId),
    Employee(EmployeeId),
}

impl SessionOwner {
    pub fn principal_id(&self) -> Uuid {
        match self {
            SessionOwner::Admin(id) => *id.as_uuid(),
            SessionOwner::Employee(id) => *id.as_uuid(),
        }
    }
}

/// A persisted session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub access_token: String,
    /// Immutable after creation; the same refresh token stays valid until
    /// its own expiry or explicit logout (no rotation).
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub tenant_id: Option<TenantId>,
    pub employee_id: Option<EmployeeId>,
    pub admin_id: Option<AdminId>,
}

impl Session {
    /// Resolve which principal owns this row.
    ///
    /// Admin linkage wins if both columns are somehow set; `None` means the
    /// row is corrupt and must be treated as an authentication failure.
    pub fn owner(&self) -> Option<SessionOwner> {
        match (self.admin_id, self.employee_id) {
            (Some(admin_id), _) => Some(SessionOwner::Admin(admin_id)),
            (None, Some(employee_id)) => Some(SessionOwner::Employee(employee_id)),
            (None, None) => None,
        }
    }
}

/// A session about to be inserted (the store assigns the id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub tenant_id: Option<TenantId>,
    pub employee_id: Option<EmployeeId>,
    pub admin_id: Option<AdminId>,
}

impl NewSession {
    pub fn for_admin(
        admin_id: AdminId,
        access_token: String,
        refresh_token: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at,
            tenant_id: None,
            employee_id: None,
            admin_id: Some(admin_id),
        }
    }

    pub fn for_employee(
        employee_id: EmployeeId,
        tenant_id: TenantId,
        access_token: String,
        refresh_token: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at,
            tenant_id: Some(tenant_id),
            employee_id: Some(employee_id),
            admin_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(admin: Option<AdminId>, employee: Option<EmployeeId>) -> Session {
        Session {
            id: SessionId::new(),
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: Utc::now(),
            tenant_id: None,
            employee_id: employee,
            admin_id: admin,
        }
    }

    #[test]
    fn owner_resolves_each_variant() {
        let admin_id = AdminId::new();
        let employee_id = EmployeeId::new();

        assert_eq!(
            session(Some(admin_id), None).owner(),
            Some(SessionOwner::Admin(admin_id))
        );
        assert_eq!(
            session(None, Some(employee_id)).owner(),
            Some(SessionOwner::Employee(employee_id))
        );
    }

    #[test]
    fn orphan_row_has_no_owner() {
        assert_eq!(session(None, None).owner(), None);
    }

    #[test]
    fn constructors_set_exactly_one_linkage() {
        let admin = NewSession::for_admin(
            AdminId::new(),
            "a".into(),
            "r".into(),
            Utc::now(),
        );
        assert!(admin.admin_id.is_some());
        assert!(admin.employee_id.is_none() && admin.tenant_id.is_none());

        let employee = NewSession::for_employee(
            EmployeeId::new(),
            TenantId::new(),
            "a".into(),
            "r".into(),
            Utc::now(),
        );
        assert!(employee.admin_id.is_none());
        assert!(employee.employee_id.is_some() && employee.tenant_id.is_some());
    }
}
