use taxgate_auth::{Claims, Role};
use taxgate_core::TenantId;
use uuid::Uuid;

/// Authenticated principal context for a request.
///
/// Built by the auth middleware from verified access-token claims and made
/// available to protected handlers via request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: Uuid,
    is_admin: bool,
    role: Option<Role>,
    tenant_id: Option<TenantId>,
}

impl PrincipalContext {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            principal_id: claims.sub,
            is_admin: claims.is_admin,
            role: claims.role.clone(),
            tenant_id: claims.tenant_id,
        }
    }

    pub fn principal_id(&self) -> Uuid {
        self.principal_id
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }
}

/// The raw bearer token a request authenticated with.
///
/// Logout needs the token string itself, not just the decoded claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);
