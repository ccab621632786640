//! HTTP REST API interfaces
//!
//! - `common`: error body and request extractors
//! - `middleware`: JWT authentication and role guards
//! - `modules`: DTOs and handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
