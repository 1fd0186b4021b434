//! Logout orchestrator.
//!
//! Validates the access token against the session store and deletes the
//! session row, tenant-scoped for employee logouts. A second logout with the
//! same (now-invalid) token reports failure, never silent success.

use std::sync::Arc;

use tracing::{error, info, warn};

use taxgate_core::TenantId;

use crate::error::AuthError;
use crate::repository::{RepositoryError, SessionStore};

pub struct Logout {
    sessions: Arc<dyn SessionStore>,
}

impl Logout {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn execute(
        &self,
        access_token: &str,
        tenant_id: Option<TenantId>,
    ) -> Result<(), AuthError> {
        info!("logout attempt");

        let session = self
            .sessions
            .find_by_access_token(access_token)
            .await
            .map_err(|e| {
                error!(error = %e, "session lookup failed");
                AuthError::LogoutFailed
            })?;
        let Some(session) = session else {
            warn!("invalid access token provided for logout");
            return Err(AuthError::InvalidAccessToken);
        };

        let Some(owner) = session.owner() else {
            warn!(session_id = %session.id, "session row has no principal linkage");
            return Err(AuthError::InvalidAccessToken);
        };

        match self
            .sessions
            .delete_by_id(session.id, owner.principal_id(), tenant_id)
            .await
        {
            Ok(()) => {
                info!(principal_id = %owner.principal_id(), "logout successful");
                Ok(())
            }
            Err(RepositoryError::NotFound) => {
                // Already deleted, or the supplied tenant does not own the
                // session. Either way the caller gets a failure, not success.
                warn!(session_id = %session.id, "no matching session row to delete");
                Err(AuthError::LogoutFailed)
            }
            Err(e) => {
                error!(session_id = %session.id, error = %e, "logout process failed");
                Err(AuthError::LogoutFailed)
            }
        }
    }
}
