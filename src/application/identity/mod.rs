//! Identity module: authentication and registration
//!
//! Contains the `AuthService` which issues and verifies tokens.

pub mod service;

pub use service::{AuthResult, AuthService};
