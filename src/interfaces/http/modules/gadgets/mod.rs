//! Gadget inventory module: CRUD, listing, statistics, decommission

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
