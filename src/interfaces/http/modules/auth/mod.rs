//! Authentication module: login, register, token verification

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
