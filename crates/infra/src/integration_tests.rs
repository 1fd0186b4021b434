//! End-to-end tests of the auth flows over the in-memory repositories.

use std::sync::Arc;

use chrono::Utc;

use taxgate_auth::{
    AdminPrincipal, AuthConfig, AuthError, AuthService, BcryptVerifier, CredentialVerifier,
    EmployeePrincipal, PrincipalKind, Role, SessionStore, SignInRequest, TokenCodec, TokenKind,
};
use taxgate_core::{AdminId, EmployeeId, RoleId, TenantId};

use crate::memory::{
    InMemoryAdminRepository, InMemoryEmployeeRepository, InMemoryRoleRepository,
    InMemorySessionStore,
};

// Low bcrypt cost keeps the suite fast; production uses BcryptVerifier::DEFAULT_COST.
const TEST_COST: u32 = 4;

struct Harness {
    admins: Arc<InMemoryAdminRepository>,
    employees: Arc<InMemoryEmployeeRepository>,
    roles: Arc<InMemoryRoleRepository>,
    sessions: Arc<InMemorySessionStore>,
    codec: Arc<TokenCodec>,
    verifier: Arc<BcryptVerifier>,
    service: AuthService,
}

fn harness() -> Harness {
    let config = AuthConfig::new("access-secret", "refresh-secret", 900, 3_600);
    let admins = Arc::new(InMemoryAdminRepository::new());
    let employees = Arc::new(InMemoryEmployeeRepository::new());
    let roles = Arc::new(InMemoryRoleRepository::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let codec = Arc::new(TokenCodec::new(&config));
    let verifier = Arc::new(BcryptVerifier::new(TEST_COST));

    let service = AuthService::new(
        Arc::clone(&admins) as _,
        Arc::clone(&employees) as _,
        Arc::clone(&roles) as _,
        Arc::clone(&sessions) as _,
        Arc::clone(&verifier) as _,
        Arc::clone(&codec),
    );

    Harness {
        admins,
        employees,
        roles,
        sessions,
        codec,
        verifier,
        service,
    }
}

impl Harness {
    fn seed_admin(&self, email: &str, password: &str) -> AdminPrincipal {
        let admin = AdminPrincipal {
            id: AdminId::new(),
            email: email.to_string(),
            password_hash: self.verifier.hash(password).unwrap(),
            full_name: "Root Admin".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.admins.insert(admin.clone());
        admin
    }

    fn seed_employee(
        &self,
        email: &str,
        password: &str,
        tenant_id: TenantId,
        role: Option<(&str, RoleId)>,
    ) -> EmployeePrincipal {
        if let Some((name, role_id)) = role {
            self.roles.insert(role_id, Role::new(name.to_string()));
        }
        let employee = EmployeePrincipal {
            id: EmployeeId::new(),
            tenant_id,
            role_id: role.map(|(_, id)| id),
            email: email.to_string(),
            password_hash: self.verifier.hash(password).unwrap(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: "+92-300-0000000".to_string(),
            is_active: true,
            status_id: Some(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.employees.insert(employee.clone());
        employee
    }
}

fn employee_request(email: &str, password: &str) -> SignInRequest {
    SignInRequest {
        email: email.to_string(),
        password: password.to_string(),
        kind: PrincipalKind::Employee,
    }
}

fn admin_request(email: &str, password: &str) -> SignInRequest {
    SignInRequest {
        email: email.to_string(),
        password: password.to_string(),
        kind: PrincipalKind::Admin,
    }
}

#[tokio::test]
async fn employee_sign_in_issues_tokens_with_resolved_role() {
    let h = harness();
    let tenant = TenantId::new();
    let employee = h.seed_employee("a@x.com", "secret1", tenant, Some(("Manager", RoleId::new())));

    let outcome = h
        .service
        .sign_in(employee_request("a@x.com", "secret1"))
        .await
        .unwrap();

    let claims = h
        .codec
        .verify(&outcome.access_token, TokenKind::Access)
        .unwrap();
    assert_eq!(claims.sub, *employee.id.as_uuid());
    assert!(!claims.is_admin);
    assert_eq!(claims.role.as_ref().map(Role::as_str), Some("Manager"));
    assert_eq!(claims.tenant_id, Some(tenant));

    // Refresh token is signed with its own secret.
    let refresh_claims = h
        .codec
        .verify(&outcome.refresh_token, TokenKind::Refresh)
        .unwrap();
    assert_eq!(refresh_claims.sub, claims.sub);

    assert_eq!(outcome.user.email, "a@x.com");
    assert_eq!(outcome.user.role.as_ref().map(Role::as_str), Some("Manager"));
    assert!(!outcome.user.is_admin);
}

#[tokio::test]
async fn admin_sign_in_carries_the_fixed_super_role() {
    let h = harness();
    let admin = h.seed_admin("root@x.com", "secret1");

    let outcome = h
        .service
        .sign_in(admin_request("root@x.com", "secret1"))
        .await
        .unwrap();

    let claims = h
        .codec
        .verify(&outcome.access_token, TokenKind::Access)
        .unwrap();
    assert_eq!(claims.sub, *admin.id.as_uuid());
    assert!(claims.is_admin);
    assert_eq!(claims.role.as_ref().map(Role::as_str), Some("SuperAdmin"));
    assert_eq!(claims.tenant_id, None);

    // Session row links the admin and nothing else.
    let session = h
        .sessions
        .find_by_access_token(&outcome.access_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.admin_id, Some(admin.id));
    assert_eq!(session.employee_id, None);
    assert_eq!(session.tenant_id, None);
}

#[tokio::test]
async fn employee_without_role_id_gets_no_role_label() {
    let h = harness();
    h.seed_employee("b@x.com", "secret1", TenantId::new(), None);

    let outcome = h
        .service
        .sign_in(employee_request("b@x.com", "secret1"))
        .await
        .unwrap();

    let claims = h
        .codec
        .verify(&outcome.access_token, TokenKind::Access)
        .unwrap();
    assert_eq!(claims.role, None);
    assert_eq!(outcome.user.role, None);
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let h = harness();
    h.seed_employee("a@x.com", "secret1", TenantId::new(), None);

    let unknown = h
        .service
        .sign_in(employee_request("nobody@x.com", "secret1"))
        .await
        .unwrap_err();
    let wrong = h
        .service
        .sign_in(employee_request("a@x.com", "wrong-password"))
        .await
        .unwrap_err();

    assert_eq!(unknown, AuthError::InvalidCredentials);
    assert_eq!(wrong, AuthError::InvalidCredentials);
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn refresh_rewrites_the_stored_access_token() {
    let h = harness();
    h.seed_employee("a@x.com", "secret1", TenantId::new(), Some(("Manager", RoleId::new())));

    let signed_in = h
        .service
        .sign_in(employee_request("a@x.com", "secret1"))
        .await
        .unwrap();

    // Distinct iat second guarantees a distinct signature.
    tokio::time::sleep(std::time::Duration::from_millis(1_100)).await;

    let refreshed = h.service.refresh(&signed_in.refresh_token).await.unwrap();
    assert_ne!(refreshed.access_token, signed_in.access_token);

    let session = h
        .sessions
        .find_by_refresh_token(&signed_in.refresh_token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.access_token, refreshed.access_token);
    // The refresh token itself is never rotated.
    assert_eq!(session.refresh_token, signed_in.refresh_token);
}

#[tokio::test]
async fn refresh_for_a_deleted_principal_fails() {
    let h = harness();
    let employee = h.seed_employee("a@x.com", "secret1", TenantId::new(), None);

    let signed_in = h
        .service
        .sign_in(employee_request("a@x.com", "secret1"))
        .await
        .unwrap();

    h.employees.remove(employee.id);

    let result = h.service.refresh(&signed_in.refresh_token).await;
    assert_eq!(result.unwrap_err(), AuthError::InvalidRefreshToken);
}

#[tokio::test]
async fn refresh_with_an_unknown_token_fails() {
    let h = harness();
    let result = h.service.refresh("no-such-token").await;
    assert_eq!(result.unwrap_err(), AuthError::InvalidRefreshToken);
}

#[tokio::test]
async fn second_logout_with_the_same_token_fails() {
    let h = harness();
    h.seed_admin("root@x.com", "secret1");

    let signed_in = h
        .service
        .sign_in(admin_request("root@x.com", "secret1"))
        .await
        .unwrap();

    h.service
        .logout(&signed_in.access_token, None)
        .await
        .unwrap();

    let second = h.service.logout(&signed_in.access_token, None).await;
    assert_eq!(second.unwrap_err(), AuthError::InvalidAccessToken);
}

#[tokio::test]
async fn employee_logout_with_a_foreign_tenant_is_rejected() {
    let h = harness();
    let tenant = TenantId::new();
    h.seed_employee("a@x.com", "secret1", tenant, None);

    let signed_in = h
        .service
        .sign_in(employee_request("a@x.com", "secret1"))
        .await
        .unwrap();

    // Token is otherwise valid, but the scope must not match.
    let mismatched = h
        .service
        .logout(&signed_in.access_token, Some(TenantId::new()))
        .await;
    assert_eq!(mismatched.unwrap_err(), AuthError::LogoutFailed);
    assert_eq!(h.sessions.len(), 1);

    h.service
        .logout(&signed_in.access_token, Some(tenant))
        .await
        .unwrap();
    assert!(h.sessions.is_empty());
}

#[tokio::test]
async fn refresh_after_logout_fails() {
    let h = harness();
    h.seed_admin("root@x.com", "secret1");

    let signed_in = h
        .service
        .sign_in(admin_request("root@x.com", "secret1"))
        .await
        .unwrap();
    h.service
        .logout(&signed_in.access_token, None)
        .await
        .unwrap();

    let result = h.service.refresh(&signed_in.refresh_token).await;
    assert_eq!(result.unwrap_err(), AuthError::InvalidRefreshToken);
}

#[tokio::test]
async fn concurrent_sessions_for_one_principal_are_independent() {
    let h = harness();
    h.seed_admin("root@x.com", "secret1");

    let first = h
        .service
        .sign_in(admin_request("root@x.com", "secret1"))
        .await
        .unwrap();
    let second = h
        .service
        .sign_in(admin_request("root@x.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(h.sessions.len(), 2);

    // Revoking one device leaves the other signed in.
    h.service.logout(&first.access_token, None).await.unwrap();
    assert_eq!(h.sessions.len(), 1);
    h.service.refresh(&second.refresh_token).await.unwrap();
}
