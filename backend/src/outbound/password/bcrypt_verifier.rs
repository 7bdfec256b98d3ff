//! bcrypt implementation of the `PasswordVerifier` port.

use crate::domain::ports::{PasswordVerifier, PasswordVerifierError};

/// Verifies and produces bcrypt hashes.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordVerifier {
    cost: u32,
}

impl Default for BcryptPasswordVerifier {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl BcryptPasswordVerifier {
    /// Use `cost` when hashing. Verification reads the cost from the hash.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash `password` for storage.
    ///
    /// # Errors
    ///
    /// Returns [`bcrypt::BcryptError`] when the cost is out of range.
    pub fn hash(&self, password: &str) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(password, self.cost)
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError> {
        bcrypt::verify(password, hash)
            .map_err(|err| PasswordVerifierError::malformed_hash(err.to_string()))
    }
}
