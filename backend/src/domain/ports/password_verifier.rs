//! Password hash comparison port.
use super::define_port_error;

define_port_error! {
    /// Errors raised when a stored hash cannot be checked.
    pub enum PasswordVerifierError {
        /// Stored hash is not in a recognised format.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Compares a plain-text password with a stored hash.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordVerifier: Send + Sync {
    /// `Ok(true)` when `password` matches `hash`.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordVerifierError>;
}
