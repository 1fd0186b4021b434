//! Dual-principal model: platform administrators and company employees.
//!
//! There is no shared base table; the two variants carry their own fields and
//! every consumer switches on the tagged union rather than downcasting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taxgate_core::{AdminId, EmployeeId, RoleId, TenantId};

use crate::Role;

/// Which principal table a sign-in request targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Admin,
    Employee,
}

/// A platform administrator. Global scope, never attached to a tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminPrincipal {
    pub id: AdminId,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A company employee. Always tenant-scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePrincipal {
    pub id: EmployeeId,
    pub tenant_id: TenantId,
    pub role_id: Option<RoleId>,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub is_active: bool,
    /// Availability status code, if the tenant tracks one.
    pub status_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An authenticated identity, one of the two variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Admin(AdminPrincipal),
    Employee(EmployeePrincipal),
}

impl Principal {
    pub fn id(&self) -> Uuid {
        match self {
            Principal::Admin(a) => *a.id.as_uuid(),
            Principal::Employee(e) => *e.id.as_uuid(),
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Principal::Admin(a) => &a.email,
            Principal::Employee(e) => &e.email,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Principal::Admin(a) => &a.password_hash,
            Principal::Employee(e) => &e.password_hash,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Principal::Admin(_))
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        match self {
            Principal::Admin(_) => None,
            Principal::Employee(e) => Some(e.tenant_id),
        }
    }

    pub fn status_id(&self) -> Option<i64> {
        match self {
            Principal::Admin(_) => None,
            Principal::Employee(e) => e.status_id,
        }
    }
}

/// Public-safe view of a principal returned by sign-in.
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalSummary {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<RoleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
}

impl PrincipalSummary {
    /// Build the summary for a resolved principal and its role label.
    pub fn of(principal: &Principal, role: Option<Role>) -> Self {
        match principal {
            Principal::Admin(a) => Self {
                id: *a.id.as_uuid(),
                email: a.email.clone(),
                first_name: Some(a.full_name.clone()),
                last_name: None,
                role,
                role_id: None,
                status: None,
                is_admin: true,
                tenant_id: None,
            },
            Principal::Employee(e) => Self {
                id: *e.id.as_uuid(),
                email: e.email.clone(),
                first_name: Some(e.first_name.clone()),
                last_name: Some(e.last_name.clone()),
                role,
                role_id: e.role_id,
                status: e.status_id,
                is_admin: false,
                tenant_id: Some(e.tenant_id),
            },
        }
    }
}
