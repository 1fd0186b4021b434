//! Credential verification seam.
//!
//! The hashing primitive is an external collaborator behind
//! [`CredentialVerifier`]; production uses bcrypt, tests can lower the cost
//! factor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Compares plaintext passwords against stored hashes (and produces hashes
/// for provisioning paths).
pub trait CredentialVerifier: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;

    fn compare(&self, plaintext: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// bcrypt-backed verifier with automatic salting.
pub struct BcryptVerifier {
    cost: u32,
}

impl BcryptVerifier {
    /// Recommended production cost factor.
    pub const DEFAULT_COST: u32 = 12;

    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptVerifier {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}

impl CredentialVerifier for BcryptVerifier {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    fn compare(&self, plaintext: &str, hash: &str) -> Result<bool, CredentialError> {
        bcrypt::verify(plaintext, hash).map_err(|e| CredentialError::Hashing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_compare_accepts_the_password() {
        let verifier = BcryptVerifier::new(bcrypt::DEFAULT_COST.min(4));
        let hash = verifier.hash("secret1").unwrap();

        assert!(verifier.compare("secret1", &hash).unwrap());
        assert!(!verifier.compare("secret2", &hash).unwrap());
    }

    #[test]
    fn compare_against_garbage_hash_errors() {
        let verifier = BcryptVerifier::new(4);
        assert!(verifier.compare("secret1", "not-a-bcrypt-hash").is_err());
    }
}
