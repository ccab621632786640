//! # IMF Gadget API
//!
//! REST service for the IMF gadget inventory: CRUD with filtering and
//! pagination, aggregate statistics, a decommission state machine, and
//! JWT authentication with agent/admin roles.
//!
//! ## Architecture
//!
//! - **domain**: Gadget and user models, status rules, repository traits
//! - **application**: Gadget and identity services
//! - **infrastructure**: SeaORM persistence, migrations, seeding, JWT and bcrypt
//! - **interfaces**: Axum router, middleware, DTOs and handlers
//! - **shared**: Pagination types and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use config::{default_config_path, resolve_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
