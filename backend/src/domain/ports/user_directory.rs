//! Port for the account directory behind signup and login.
//!
//! Credential handling stays behind this boundary; the domain only ever
//! sees opaque [`User`] identities.

use async_trait::async_trait;

use crate::domain::user::{User, UserId, Username};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// The underlying store could not be reached or mutated.
    #[error("user directory failure: {0}")]
    Storage(String),
    /// Another account already holds this username.
    #[error("username {0} is already taken")]
    DuplicateUsername(Username),
}

/// Port for account registration and credential checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Create an account, rejecting a username already registered.
    async fn register(
        &self,
        username: &Username,
        password: &str,
    ) -> Result<User, UserDirectoryError>;

    /// Check credentials, returning the matching user on success.
    async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserDirectoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError>;
}
