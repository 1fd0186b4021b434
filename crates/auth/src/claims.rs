//! Token claims model.
//!
//! Access and refresh tokens carry the same claim shape; they differ only in
//! the secret that signs them and the expiry stamped by the codec.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taxgate_core::TenantId;

use crate::{Principal, Role};

/// Principal facts embedded in both token kinds.
///
/// The codec stamps `iat`/`exp` on top of this when issuing, producing
/// [`Claims`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
    pub role: Option<Role>,
    pub status: Option<i64>,
    pub tenant_id: Option<TenantId>,
}

impl TokenSubject {
    /// Build the subject for a resolved principal and its role label.
    pub fn of(principal: &Principal, role: Option<Role>) -> Self {
        Self {
            id: principal.id(),
            email: principal.email().to_string(),
            is_admin: principal.is_admin(),
            role,
            status: principal.status_id(),
            tenant_id: principal.tenant_id(),
        }
    }
}

/// The structured payload of a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's id.
    pub sub: Uuid,
    pub email: String,
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch. Verification rejects tokens
    /// past this instant; there is no grace period.
    pub exp: i64,
}

impl Claims {
    /// Stamp a subject with an issuance window.
    pub fn stamp(subject: &TokenSubject, iat: i64, exp: i64) -> Self {
        Self {
            sub: subject.id,
            email: subject.email.clone(),
            is_admin: subject.is_admin,
            role: subject.role.clone(),
            status: subject.status,
            tenant_id: subject.tenant_id,
            iat,
            exp,
        }
    }
}
