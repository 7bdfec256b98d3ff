//! Port abstraction for account lookups and their errors.
use async_trait::async_trait;

use crate::domain::UserAccount;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the account registered under `email`, matched exactly.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserPersistenceError>;
}

/// In-memory account list used when no database is configured.
#[derive(Debug, Default, Clone)]
pub struct FixtureUserRepository {
    accounts: Vec<UserAccount>,
}

impl FixtureUserRepository {
    pub fn new(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        Self {
            accounts: accounts.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .accounts
            .iter()
            .find(|account| account.email() == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("ADA@example.com", false)]
    #[case("grace@example.com", false)]
    #[tokio::test]
    async fn fixture_matches_email_exactly(#[case] email: &str, #[case] found: bool) {
        let account =
            UserAccount::new(UserId::random(), "ada@example.com", "$2b$04$hash").expect("account");
        let repo = FixtureUserRepository::new([account]);
        let result = repo.find_by_email(email).await.expect("fixture lookup");
        assert_eq!(result.is_some(), found);
    }
}
