//! Repository access for the domain layer

use std::sync::Arc;

use super::gadget::GadgetRepository;
use super::user::UserRepository;

/// Provides access to all domain repositories.
///
/// Consumers ask only for the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let gadget = repos.gadgets().find_by_id("…").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn gadgets(&self) -> Arc<dyn GadgetRepository>;
    fn users(&self) -> Arc<dyn UserRepository>;
}
