//! Signed-token codec (HS256).
//!
//! Access and refresh tokens use independent secrets and independent expiry
//! durations, both injected through [`AuthConfig`]. The codec is a pure
//! cryptographic transform: no I/O, no shared mutable state.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::claims::{Claims, TokenSubject};
use crate::config::AuthConfig;

/// Which of the two token families a string belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// A freshly minted access/refresh pair.
///
/// `expires_at` is the session expiry (now + refresh TTL), persisted on the
/// session row at sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token")]
    Invalid,

    #[error("token encoding failed: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

struct KeyedSecret {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl KeyedSecret {
    fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

/// Signs and verifies compact tokens carrying [`Claims`].
pub struct TokenCodec {
    access: KeyedSecret,
    refresh: KeyedSecret,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced exactly; no clock-skew grace.
        validation.leeway = 0;

        Self {
            access: KeyedSecret::new(&config.access_secret, config.access_ttl),
            refresh: KeyedSecret::new(&config.refresh_secret, config.refresh_ttl),
            validation,
        }
    }

    fn secret(&self, kind: TokenKind) -> &KeyedSecret {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn issue(&self, subject: &TokenSubject, kind: TokenKind) -> Result<String, TokenError> {
        let secret = self.secret(kind);
        let now = Utc::now();
        let claims = Claims::stamp(
            subject,
            now.timestamp(),
            (now + secret.ttl).timestamp(),
        );

        encode(&Header::new(Algorithm::HS256), &claims, &secret.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    pub fn issue_access_token(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.issue(subject, TokenKind::Access)
    }

    pub fn issue_refresh_token(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.issue(subject, TokenKind::Refresh)
    }

    /// Mint an access/refresh pair for one subject.
    pub fn issue_pair(&self, subject: &TokenSubject) -> Result<TokenPair, TokenError> {
        let access_token = self.issue(subject, TokenKind::Access)?;
        let refresh_token = self.issue(subject, TokenKind::Refresh)?;
        let expires_at = Utc::now() + self.refresh.ttl;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_at,
        })
    }

    /// Verify a token against the secret for `kind`.
    ///
    /// Fails when the signature does not match, the token is malformed, or
    /// the `exp` claim has elapsed.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.secret(kind).decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use proptest::prelude::*;
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig::new("access-secret", "refresh-secret", 900, 604_800)
    }

    fn subject() -> TokenSubject {
        TokenSubject {
            id: Uuid::now_v7(),
            email: "a@x.com".to_string(),
            is_admin: false,
            role: Some(Role::new("Manager")),
            status: Some(1),
            tenant_id: Some(taxgate_core::TenantId::new()),
        }
    }

    #[test]
    fn access_token_round_trips_claims() {
        let codec = TokenCodec::new(&config());
        let subject = subject();

        let token = codec.issue_access_token(&subject).unwrap();
        let claims = codec.verify(&token, TokenKind::Access).unwrap();

        assert_eq!(claims.sub, subject.id);
        assert_eq!(claims.email, subject.email);
        assert_eq!(claims.role, subject.role);
        assert_eq!(claims.tenant_id, subject.tenant_id);
        assert!(!claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn access_and_refresh_secrets_are_independent() {
        let codec = TokenCodec::new(&config());
        let subject = subject();

        let access = codec.issue_access_token(&subject).unwrap();
        let refresh = codec.issue_refresh_token(&subject).unwrap();

        assert!(matches!(
            codec.verify(&access, TokenKind::Refresh),
            Err(TokenError::Invalid)
        ));
        assert!(matches!(
            codec.verify(&refresh, TokenKind::Access),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn expired_token_never_verifies() {
        let expired = AuthConfig::new("access-secret", "refresh-secret", -60, -60);
        let codec = TokenCodec::new(&expired);

        let token = codec.issue_access_token(&subject()).unwrap();
        assert!(matches!(
            codec.verify(&token, TokenKind::Access),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn malformed_token_is_invalid() {
        let codec = TokenCodec::new(&config());
        assert!(matches!(
            codec.verify("not.a.token", TokenKind::Access),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let codec = TokenCodec::new(&config());
        let other = TokenCodec::new(&AuthConfig::new("other", "other", 900, 900));

        let token = codec.issue_access_token(&subject()).unwrap();
        assert!(matches!(
            other.verify(&token, TokenKind::Access),
            Err(TokenError::Invalid)
        ));
    }

    proptest! {
        #[test]
        fn arbitrary_subjects_round_trip(email in "[a-z]{1,12}@[a-z]{1,8}\\.com", is_admin: bool, status in proptest::option::of(0i64..100)) {
            let codec = TokenCodec::new(&config());
            let subject = TokenSubject {
                id: Uuid::now_v7(),
                email,
                is_admin,
                role: None,
                status,
                tenant_id: None,
            };

            let token = codec.issue_access_token(&subject).unwrap();
            let claims = codec.verify(&token, TokenKind::Access).unwrap();

            prop_assert_eq!(claims.sub, subject.id);
            prop_assert_eq!(claims.email, subject.email);
            prop_assert_eq!(claims.is_admin, subject.is_admin);
            prop_assert_eq!(claims.status, subject.status);
        }
    }
}
