//! Service root and liveness endpoints

pub mod handlers;

pub use handlers::*;
