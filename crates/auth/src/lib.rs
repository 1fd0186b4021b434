//! `taxgate-auth` — authentication & session-lifecycle core.
//!
//! This crate owns credential verification, dual-principal role resolution,
//! signed-token issuance, session records, refresh, and revocation. It is
//! intentionally decoupled from HTTP and storage: persistence is reached
//! through the repository interfaces in [`repository`], and the HTTP layer
//! consumes the orchestrators through [`service::AuthService`].

pub mod claims;
pub mod config;
pub mod envelope;
pub mod error;
pub mod logout;
pub mod password;
pub mod principal;
pub mod refresh;
pub mod repository;
pub mod roles;
pub mod service;
pub mod session;
pub mod signin;
pub mod token;

pub use claims::{Claims, TokenSubject};
pub use config::{AuthConfig, ConfigError};
pub use envelope::Envelope;
pub use error::AuthError;
pub use logout::Logout;
pub use password::{BcryptVerifier, CredentialError, CredentialVerifier};
pub use principal::{AdminPrincipal, EmployeePrincipal, Principal, PrincipalKind, PrincipalSummary};
pub use refresh::{Refresh, RefreshOutcome};
pub use repository::{
    AdminRepository, EmployeeRepository, RepositoryError, RoleRecord, RoleRepository, SessionStore,
};
pub use roles::Role;
pub use service::AuthService;
pub use session::{NewSession, Session, SessionOwner};
pub use signin::{SignIn, SignInOutcome, SignInRequest};
pub use token::{TokenCodec, TokenError, TokenKind, TokenPair};
