//! Service wiring: Postgres repositories behind the auth orchestrators.

use std::sync::Arc;

use sqlx::PgPool;

use taxgate_auth::{AuthService, BcryptVerifier, TokenCodec};
use taxgate_infra::{
    PgAdminRepository, PgEmployeeRepository, PgRoleRepository, PgSessionStore,
};

pub struct Services {
    pub auth: AuthService,
}

pub fn build_services(pool: PgPool, codec: Arc<TokenCodec>) -> Services {
    let pool = Arc::new(pool);

    let auth = AuthService::new(
        Arc::new(PgAdminRepository::new(Arc::clone(&pool))),
        Arc::new(PgEmployeeRepository::new(Arc::clone(&pool))),
        Arc::new(PgRoleRepository::new(Arc::clone(&pool))),
        Arc::new(PgSessionStore::new(pool)),
        Arc::new(BcryptVerifier::default()),
        codec,
    );

    Services { auth }
}
