//! Request DTOs and JSON mapping helpers.
//!
//! Responses are always the uniform [`Envelope`](taxgate_auth::Envelope);
//! success bodies are built here, failure bodies in [`super::errors`].

use serde::Deserialize;

use taxgate_core::TenantId;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Employee logout carries the company scope; admin logout sends no body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub company_id: Option<TenantId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_request_uses_camel_case() {
        let parsed: RefreshRequest =
            serde_json::from_str(r#"{"refreshToken": "abc"}"#).unwrap();
        assert_eq!(parsed.refresh_token, "abc");
    }

    #[test]
    fn logout_request_tolerates_an_empty_body() {
        let parsed: LogoutRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.company_id.is_none());
    }
}
