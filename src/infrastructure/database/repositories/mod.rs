//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod gadget_repository;
pub mod repository_provider;
pub mod user_repository;

pub use gadget_repository::SeaOrmGadgetRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;
