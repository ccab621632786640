//! SeaORM implementation of RepositoryProvider

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::gadget::GadgetRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepository;

use super::gadget_repository::SeaOrmGadgetRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let gadget = repos.gadgets().find_by_codename("PEN-001", None).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    gadgets: Arc<SeaOrmGadgetRepository>,
    users: Arc<SeaOrmUserRepository>,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            gadgets: Arc::new(SeaOrmGadgetRepository::new(db.clone())),
            users: Arc::new(SeaOrmUserRepository::new(db)),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn gadgets(&self) -> Arc<dyn GadgetRepository> {
        self.gadgets.clone()
    }

    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }
}
