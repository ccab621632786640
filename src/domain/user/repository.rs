use async_trait::async_trait;

use super::{NewUser, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user whose username or email equals `login`.
    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>>;

    /// Find any user holding either the username or the email.
    async fn find_conflicting(&self, username: &str, email: &str) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    /// Insert a user. A taken username or email yields `DomainError::Conflict`.
    async fn insert(&self, user: NewUser) -> DomainResult<User>;

    async fn count(&self) -> DomainResult<u64>;
}
