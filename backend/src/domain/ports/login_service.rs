//! Driving port for login/logout use-cases.
//!
//! Inbound adapters call it to authenticate credentials without importing
//! the backing infrastructure, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, UserId};

/// Message returned for unknown accounts and wrong passwords alike.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// A credential mismatch is reported as `ErrorCode::NotFound`.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;

    /// Note that `user_id` ended its session. Never fails.
    fn record_logout(&self, user_id: Option<UserId>);
}

/// In-memory authenticator for local development and handler tests.
///
/// `admin@example.com` / `password` authenticates successfully and produces a
/// fixed user id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureLoginService {
    /// Identifier returned for the fixture account.
    pub const USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.email() == "admin@example.com" && credentials.password() == "password" {
            UserId::new(Self::USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::not_found(INVALID_CREDENTIALS_MESSAGE))
        }
    }

    fn record_logout(&self, _user_id: Option<UserId>) {}
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("admin@example.com", "password", true)]
    #[case("admin@example.com", "wrong", false)]
    #[case("other@example.com", "password", false)]
    #[tokio::test]
    async fn fixture_login_service_accepts_only_the_fixture_account(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let service = FixtureLoginService;
        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        let result = service.authenticate(&creds).await;
        match (should_succeed, result) {
            (true, Ok(id)) => assert_eq!(id.as_ref(), FixtureLoginService::USER_ID),
            (false, Err(err)) => {
                assert_eq!(err.code(), ErrorCode::NotFound);
                assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
            }
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }
}
