//! Authentication primitives such as login credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate field inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::validation::{FieldSource, ValidationRejection, login_rules};

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use subscriber_api::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.com", "password").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, ValidationRejection> {
        let fields: [(&str, &str); 2] = [("email", email), ("password", password)];
        Self::try_from_fields(fields.as_slice())
    }

    /// Run the login rule-set over `source` and extract the credentials.
    pub fn try_from_fields<S>(source: &S) -> Result<Self, ValidationRejection>
    where
        S: FieldSource + ?Sized,
    {
        login_rules().validate(source).into_outcome()?;
        let email = source.value("email").unwrap_or_default();
        let password = source.value("password").unwrap_or_default();
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationRejection::single("email", "Email is required"));
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.into_owned()),
        })
    }

    /// Email address used to look up the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
