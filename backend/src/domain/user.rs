//! Operator accounts that may log in to the API.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`UserId::new`] and [`UserAccount::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must not be empty")]
    EmptyId,
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("account email must not be empty")]
    EmptyEmail,
    #[error("account password hash must not be empty")]
    EmptyPasswordHash,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an already parsed UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Stored account used to check login credentials.
///
/// ## Invariants
/// - `email` is non-empty and compared exactly as stored.
/// - `password_hash` is a non-empty bcrypt hash; it is never serialised and
///   is elided from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    email: String,
    password_hash: String,
}

impl UserAccount {
    /// Build an account from persisted parts.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let password_hash = password_hash.into();
        if password_hash.is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self {
            id,
            email,
            password_hash,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }
}

impl fmt::Debug for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAccount")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case("not-a-uuid", UserValidationError::InvalidId)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(UserId::new(raw).expect_err("malformed id"), expected);
    }

    #[rstest]
    fn user_id_serialises_as_string() {
        let id = UserId::new(VALID_ID).expect("valid id");
        let value = serde_json::to_value(&id).expect("serialise");
        assert_eq!(value, serde_json::json!(VALID_ID));
        let back: UserId = serde_json::from_value(value).expect("deserialise");
        assert_eq!(back, id);
    }

    #[rstest]
    #[case("", "$2b$04$hash", UserValidationError::EmptyEmail)]
    #[case("   ", "$2b$04$hash", UserValidationError::EmptyEmail)]
    #[case("ada@example.com", "", UserValidationError::EmptyPasswordHash)]
    fn account_requires_email_and_hash(
        #[case] email: &str,
        #[case] hash: &str,
        #[case] expected: UserValidationError,
    ) {
        let err = UserAccount::new(UserId::random(), email, hash).expect_err("invalid account");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn debug_output_hides_password_hash() {
        let account =
            UserAccount::new(UserId::random(), "ada@example.com", "$2b$04$secret").expect("account");
        let rendered = format!("{account:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("ada@example.com"));
    }
}
