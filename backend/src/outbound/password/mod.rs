//! Password hashing adapters.

mod bcrypt_verifier;

pub use bcrypt_verifier::BcryptPasswordVerifier;
